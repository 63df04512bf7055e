use serde_core::ser::{SerializeMap, SerializeSeq};

use super::driver::ContentSerializer;
use super::error_utils::make_custom_error;

use crate::content::Content;
use crate::error::Error;
use crate::schema::PropertyDescriptor;
use crate::ser::SerializeContext;

// -----------------------------------------------------------------------------
// Sink

/// The output a [`PropertyWriter`](crate::ser::PropertyWriter) or a
/// [`PropertyFilter`](crate::filter::PropertyFilter) writes to.
///
/// Inside an object a field name must precede every value. Inside an array
/// (array-shaped beans) only values are accepted.
pub trait Sink {
    fn write_field_name(&mut self, name: &str) -> Result<(), Error>;

    /// Writes a value with no property context.
    fn write_value(&mut self, value: &dyn Content) -> Result<(), Error>;

    /// Writes the value of `property`, whose filter and content policy bind
    /// to the value's own entries.
    fn write_property_value(
        &mut self,
        value: &dyn Content,
        property: &PropertyDescriptor,
    ) -> Result<(), Error>;

    fn write_null(&mut self) -> Result<(), Error>;
}

// -----------------------------------------------------------------------------
// ObjectSink

/// [`Sink`] over an open `serde` map.
///
/// Errors of the underlying serializer are kept and handed back unchanged by
/// [`into_error`](Self::into_error).
pub(super) struct ObjectSink<'s, 'c, M: SerializeMap> {
    state: &'s mut M,
    ctx: &'s SerializeContext<'c>,
    error: Option<M::Error>,
}

impl<'s, 'c, M: SerializeMap> ObjectSink<'s, 'c, M> {
    #[inline]
    pub(super) fn new(state: &'s mut M, ctx: &'s SerializeContext<'c>) -> Self {
        Self {
            state,
            ctx,
            error: None,
        }
    }

    #[inline]
    fn check(&mut self, result: Result<(), M::Error>) -> Result<(), Error> {
        result.map_err(|err| {
            let error = Error::sink(&err);
            self.error = Some(err);
            error
        })
    }

    /// Turns an error returned while writing to this sink into the
    /// serializer's error type.
    pub(super) fn into_error(mut self, err: Error) -> M::Error {
        match (self.error.take(), err) {
            (Some(native), Error::Sink(_)) => native,
            (_, err) => make_custom_error(err),
        }
    }
}

impl<M: SerializeMap> Sink for ObjectSink<'_, '_, M> {
    fn write_field_name(&mut self, name: &str) -> Result<(), Error> {
        let result = self.state.serialize_key(name);
        self.check(result)
    }

    fn write_value(&mut self, value: &dyn Content) -> Result<(), Error> {
        let result = self
            .state
            .serialize_value(&ContentSerializer::new(value, self.ctx, None));
        self.check(result)
    }

    fn write_property_value(
        &mut self,
        value: &dyn Content,
        property: &PropertyDescriptor,
    ) -> Result<(), Error> {
        let result = self
            .state
            .serialize_value(&ContentSerializer::new(value, self.ctx, Some(property)));
        self.check(result)
    }

    fn write_null(&mut self) -> Result<(), Error> {
        let result = self.state.serialize_value(&Option::<()>::None);
        self.check(result)
    }
}

// -----------------------------------------------------------------------------
// ArraySink

/// [`Sink`] over an open `serde` sequence.
pub(super) struct ArraySink<'s, 'c, Q: SerializeSeq> {
    state: &'s mut Q,
    ctx: &'s SerializeContext<'c>,
    error: Option<Q::Error>,
}

impl<'s, 'c, Q: SerializeSeq> ArraySink<'s, 'c, Q> {
    #[inline]
    pub(super) fn new(state: &'s mut Q, ctx: &'s SerializeContext<'c>) -> Self {
        Self {
            state,
            ctx,
            error: None,
        }
    }

    #[inline]
    fn check(&mut self, result: Result<(), Q::Error>) -> Result<(), Error> {
        result.map_err(|err| {
            let error = Error::sink(&err);
            self.error = Some(err);
            error
        })
    }

    /// See [`ObjectSink::into_error`].
    pub(super) fn into_error(mut self, err: Error) -> Q::Error {
        match (self.error.take(), err) {
            (Some(native), Error::Sink(_)) => native,
            (_, err) => make_custom_error(err),
        }
    }
}

impl<Q: SerializeSeq> Sink for ArraySink<'_, '_, Q> {
    fn write_field_name(&mut self, name: &str) -> Result<(), Error> {
        Err(Error::sink(format_args!(
            "cannot write field name `{name}` inside an array"
        )))
    }

    fn write_value(&mut self, value: &dyn Content) -> Result<(), Error> {
        let result = self
            .state
            .serialize_element(&ContentSerializer::new(value, self.ctx, None));
        self.check(result)
    }

    fn write_property_value(
        &mut self,
        value: &dyn Content,
        property: &PropertyDescriptor,
    ) -> Result<(), Error> {
        let result = self
            .state
            .serialize_element(&ContentSerializer::new(value, self.ctx, Some(property)));
        self.check(result)
    }

    fn write_null(&mut self) -> Result<(), Error> {
        let result = self.state.serialize_element(&Option::<()>::None);
        self.check(result)
    }
}
