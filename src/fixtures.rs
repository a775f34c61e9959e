#[cfg(test)]
pub mod test {
    use crate::types::{Attr, FieldType, Fields};

    /// Plain typed fields, one of them mandatory.
    pub fn regular_fields() -> Fields {
        Fields::new()
            .with("stringvalue", Attr::new(FieldType::String))
            .with(
                "mandatory-stringvalue",
                Attr::new(FieldType::String).mandatory(),
            )
            .with("intvalue", Attr::new(FieldType::Int))
            .with("boolvalue", Attr::new(FieldType::Bool))
    }

    /// Fields restricted to enumerated values.
    pub fn enum_fields() -> Fields {
        Fields::new()
            .with("enumstring", Attr::new(FieldType::String).values(["a", "b"]))
            .with(
                "enumint",
                Attr::new(FieldType::Int).values([toml::Value::Integer(10), "20".into()]),
            )
    }

    /// Fields with declared defaults, including a mandatory one.
    pub fn defaults_fields() -> Fields {
        Fields::new()
            .with("stringvalue", Attr::new(FieldType::String).default_value("hello"))
            .with(
                "mandatory-stringvalue",
                Attr::new(FieldType::String)
                    .mandatory()
                    .default_value("hello"),
            )
            .with("intvalue", Attr::new(FieldType::Int).default_value(10))
            .with(
                "intvalue-with-string-default",
                Attr::new(FieldType::Int).default_value("10"),
            )
            .with("boolvalue", Attr::new(FieldType::Bool).default_value(true))
    }

    /// Two groups, each with one secret field listed out of order.
    pub fn grouped_fields() -> Fields {
        let attr = |group: &str, desc: &str| {
            Attr::new(FieldType::String).group(group).description(desc)
        };
        Fields::new()
            .with("a1", attr("A", "a1"))
            .with("b1", attr("A", "b1").secret())
            .with("c1", attr("A", "c1"))
            .with("a2", attr("B", "a2"))
            .with("b2", attr("B", "b2").secret())
            .with("c2", attr("B", "c2"))
    }

    /// Input stream whose every read fails.
    pub struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    impl std::io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::other("device gone"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn fixtures_compile() {
        assert!(regular_fields().validation_schema().is_ok());
        assert!(enum_fields().validation_schema().is_ok());
        assert!(defaults_fields().validation_schema().is_ok());
        assert!(grouped_fields().validation_schema().is_ok());
    }
}
