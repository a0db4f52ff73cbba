use serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};

use crate::{Bytes, FixedListSegment, VarBytes, VariableListSegment};

impl<T> Serialize for FixedListSegment<'_, T>
where
    T: Bytes + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(&value.map_err(S::Error::custom)?)?;
        }
        seq.end()
    }
}

impl<T> Serialize for VariableListSegment<'_, T>
where
    T: VarBytes + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(&value.map_err(S::Error::custom)?)?;
        }
        seq.end()
    }
}
