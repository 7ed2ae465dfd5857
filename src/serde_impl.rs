use crate::Path;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Formatter;

/// Paths serialize as their textual form, i.e. `"/bin/b:PFqBJQ=="`.
impl<'a> Serialize for Path<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path<'static> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PathVisitor)
    }
}

struct PathVisitor;

impl<'de> Visitor<'de> for PathVisitor {
    type Value = Path<'static>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a slash separated path string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Path::parse(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod test {
    use crate::{Path, PathError};

    #[test]
    fn serialize_as_text() {
        let path = Path::must_parse("/bin").concat(&Path::from_segment(&[60, 90, 129, 37]).unwrap());
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#""/bin/b:PFqBJQ==""#);

        let decoded: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, path);
    }

    #[test]
    fn deserialize_in_struct() {
        #[derive(Debug, serde::Deserialize)]
        struct Mount {
            source: Path<'static>,
            target: Path<'static>,
        }

        let mount: Mount =
            serde_json::from_str(r#"{"source": "dev//b:AAE=", "target": "/mnt/data"}"#).unwrap();
        assert_eq!(mount.source.iter().count(), 2);
        assert_eq!(mount.source.to_string(), "/dev/b:AAE=");
        assert_eq!(mount.target, Path::must_parse("mnt/data"));
    }

    #[test]
    fn deserialize_invalid() {
        let err = serde_json::from_str::<Path>(r#""/b:@@""#).unwrap_err();
        let expected = Path::parse("/b:@@").unwrap_err();
        assert!(matches!(expected, PathError::Base64Decode { .. }));
        assert!(err.to_string().contains(&expected.to_string()));
    }
}
