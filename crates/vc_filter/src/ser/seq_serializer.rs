use serde_core::{Serialize, Serializer, ser::SerializeSeq};

use super::driver::ContentSerializer;

use crate::content::SeqContent;
use crate::ser::SerializeContext;

/// A serializer for [`SeqContent`] values.
///
/// Elements carry no property context.
pub(super) struct SeqSerializer<'a, 'c> {
    pub seq: &'a dyn SeqContent,
    pub ctx: &'a SerializeContext<'c>,
}

impl Serialize for SeqSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.seq.len()))?;
        for value in self.seq.iter() {
            state.serialize_element(&ContentSerializer::new(value, self.ctx, None))?;
        }
        state.end()
    }
}
