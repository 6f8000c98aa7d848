//! Long-running operation handle.
//!
//! ARM answers a `PUT` before provisioning has finished. A [`Poller`] keeps
//! the first response and re-reads the resource until its
//! `provisioningState` is terminal.

use crate::error::{Result, VwanError};
use crate::models::Provisioned;
use std::time::Duration;

type Refresh<T> = Box<dyn FnMut() -> Result<T>>;

pub struct Poller<T> {
    initial: T,
    refresh: Option<Refresh<T>>,
    interval: Duration,
    max_polls: u32,
}

impl<T> std::fmt::Debug for Poller<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("initial", &self.initial)
            .field("pollable", &self.refresh.is_some())
            .field("interval", &self.interval)
            .field("max_polls", &self.max_polls)
            .finish()
    }
}

impl<T: Provisioned> Poller<T> {
    /// Already complete; `result()` returns `value` as is.
    pub fn done(value: T) -> Poller<T> {
        Poller {
            initial: value,
            refresh: None,
            interval: Duration::ZERO,
            max_polls: 0,
        }
    }

    /// Re-read the resource with `refresh` every `interval`, at most `max_polls` times.
    pub fn new<F>(initial: T, interval: Duration, max_polls: u32, refresh: F) -> Poller<T>
    where
        F: FnMut() -> Result<T> + 'static,
    {
        Poller {
            initial,
            refresh: Some(Box::new(refresh)),
            interval,
            max_polls,
        }
    }

    /// The first response, without waiting.
    pub fn initial(self) -> T {
        self.initial
    }

    /// Wait for a terminal provisioning state and return the final resource.
    pub fn result(self) -> Result<T> {
        let Poller {
            initial,
            refresh,
            interval,
            max_polls,
        } = self;

        let mut current = initial;
        if let Some(mut refresh) = refresh {
            let mut polls = 0;
            while !current.is_terminal() {
                if polls >= max_polls {
                    return Err(VwanError::Remote(format!(
                        "Operation did not finish after {polls} polls, last provisioningState={}",
                        current.provisioning_state().unwrap_or("unknown")
                    )));
                }
                log::info!(
                    "provisioningState={} poll #{polls}, sleep {interval:?} ...",
                    current.provisioning_state().unwrap_or("unknown")
                );
                std::thread::sleep(interval);
                current = refresh()?;
                polls += 1;
            }
        }

        match current.provisioning_state() {
            Some(state)
                if state.eq_ignore_ascii_case("Failed")
                    || state.eq_ignore_ascii_case("Canceled") =>
            {
                Err(VwanError::Remote(format!(
                    "Long running operation ended with provisioningState={state}"
                )))
            }
            _ => Ok(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{VirtualWan, VirtualWanProperties};
    use std::cell::Cell;
    use std::rc::Rc;

    fn wan(state: &str) -> VirtualWan {
        VirtualWan {
            name: Some("wan1".to_string()),
            properties: Some(VirtualWanProperties {
                provisioning_state: Some(state.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn state(w: &VirtualWan) -> Option<&str> {
        w.provisioning_state()
    }

    #[test]
    fn test_done_returns_value() {
        let w = Poller::done(wan("Succeeded")).result().expect("result");
        assert_eq!(state(&w), Some("Succeeded"));
    }

    #[test]
    fn test_terminal_initial_state_never_refreshes() {
        let poller = Poller::new(wan("Succeeded"), Duration::ZERO, 5, || {
            panic!("should not poll")
        });
        assert!(poller.result().is_ok());
    }

    #[test]
    fn test_refresh_until_succeeded() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let poller = Poller::new(wan("Updating"), Duration::ZERO, 5, move || {
            counter.set(counter.get() + 1);
            if counter.get() < 3 {
                Ok(wan("Updating"))
            } else {
                Ok(wan("Succeeded"))
            }
        });
        let w = poller.result().expect("result");
        assert_eq!(state(&w), Some("Succeeded"));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_failed_state_is_error() {
        let poller = Poller::new(wan("Updating"), Duration::ZERO, 5, || Ok(wan("Failed")));
        let err = poller.result().unwrap_err();
        assert!(matches!(err, VwanError::Remote(_)), "got {err:?}");
    }

    #[test]
    fn test_poll_budget_exhausted() {
        let poller = Poller::new(wan("Updating"), Duration::ZERO, 2, || Ok(wan("Updating")));
        let err = poller.result().unwrap_err();
        assert!(err.to_string().contains("2 polls"), "got {err}");
    }

    #[test]
    fn test_initial_skips_polling() {
        let poller = Poller::new(wan("Updating"), Duration::ZERO, 5, || {
            panic!("should not poll")
        });
        assert_eq!(state(&poller.initial()), Some("Updating"));
    }

    #[test]
    fn test_refresh_error_propagates() {
        let poller = Poller::new(wan("Updating"), Duration::ZERO, 5, || {
            Err(VwanError::Remote("boom".to_string()))
        });
        assert_eq!(poller.result(), Err(VwanError::Remote("boom".to_string())));
    }
}
