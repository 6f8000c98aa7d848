//! Partial updates of an in-memory resource.
//!
//! A command line value is either absent (leave the field alone), the empty
//! string (clear the field, if the field allows it) or a new value.

use crate::error::Result;

/// What an update should do with a single optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<V> {
    /// No value given.
    Keep,
    /// Empty value given.
    Clear,
    Set(V),
}

impl<V> Default for FieldUpdate<V> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl FieldUpdate<String> {
    /// Raw command line string: `None` keeps, `""` clears.
    pub fn from_arg(arg: Option<String>) -> FieldUpdate<String> {
        match arg {
            None => FieldUpdate::Keep,
            Some(value) if value.is_empty() => FieldUpdate::Clear,
            Some(value) => FieldUpdate::Set(value),
        }
    }
}

impl<V> FieldUpdate<V> {
    /// Typed value that can never be cleared from the command line.
    pub fn from_option(value: Option<V>) -> FieldUpdate<V> {
        match value {
            None => FieldUpdate::Keep,
            Some(value) => FieldUpdate::Set(value),
        }
    }

    /// Like [`FieldUpdate::from_arg`] with a fallible conversion of a non-empty value.
    pub fn parse_arg<F>(arg: Option<&str>, parse: F) -> Result<FieldUpdate<V>>
    where
        F: FnOnce(&str) -> Result<V>,
    {
        Ok(match arg {
            None => FieldUpdate::Keep,
            Some("") => FieldUpdate::Clear,
            Some(value) => FieldUpdate::Set(parse(value)?),
        })
    }

    pub fn map<U, F>(self, f: F) -> FieldUpdate<U>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            FieldUpdate::Keep => FieldUpdate::Keep,
            FieldUpdate::Clear => FieldUpdate::Clear,
            FieldUpdate::Set(value) => FieldUpdate::Set(f(value)),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, FieldUpdate::Keep)
    }
}

/// Groups the field updates of one update call over one resource.
///
/// The field accessor is only invoked when the field actually changes, so
/// nested property blocks are not materialized by untouched fields.
pub struct UpdateContext<'a, T> {
    instance: &'a mut T,
    changed: Vec<&'static str>,
}

impl<'a, T> UpdateContext<'a, T> {
    pub fn new(instance: &'a mut T) -> UpdateContext<'a, T> {
        UpdateContext {
            instance,
            changed: Vec::new(),
        }
    }

    /// Apply `value` to the field returned by `slot`.
    ///
    /// * `Clear` with `allow_clear` sets the field to `None`
    /// * `Set(v)` overwrites the field
    /// * `Keep`, or `Clear` without `allow_clear`, leaves it untouched
    pub fn update_param<V, F>(
        &mut self,
        field: &'static str,
        slot: F,
        value: FieldUpdate<V>,
        allow_clear: bool,
    ) -> &mut Self
    where
        F: FnOnce(&mut T) -> &mut Option<V>,
    {
        match value {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear if allow_clear => {
                log::debug!("clear {field}");
                *slot(self.instance) = None;
                self.changed.push(field);
            }
            FieldUpdate::Clear => {
                log::debug!("ignoring empty value for {field}, field can not be cleared");
            }
            FieldUpdate::Set(v) => {
                log::debug!("set {field}");
                *slot(self.instance) = Some(v);
                self.changed.push(field);
            }
        }
        self
    }

    /// Names of fields changed so far, in call order.
    pub fn changed(&self) -> &[&'static str] {
        &self.changed
    }
}
