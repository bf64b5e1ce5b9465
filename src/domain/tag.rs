//! Field tag specs: `"<name>[,<option>...]"`.
//!
//! The only recognised option is `omitempty`. Unknown options are ignored.

/// Parsed field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    /// Display-name override, `None` when the name part is empty
    pub name: Option<String>,
    /// Skip the field when its value is empty
    pub omit_empty: bool,
}

impl FieldTag {
    pub fn parse(spec: &str) -> Self {
        let mut parts = spec.split(',');
        let name = parts
            .next()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let omit_empty = parts.any(|option| option.trim() == "omitempty");
        Self { name, omit_empty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("one", Some("one"), false)]
    #[case("inner_one,omitempty", Some("inner_one"), true)]
    #[case(",omitempty", None, true)]
    #[case("", None, false)]
    #[case("name,string,omitempty", Some("name"), true)]
    #[case("name,omitemptyish", Some("name"), false)]
    fn given_tag_spec_when_parsed_then_splits_name_and_options(
        #[case] spec: &str,
        #[case] name: Option<&str>,
        #[case] omit_empty: bool,
    ) {
        let tag = FieldTag::parse(spec);
        assert_eq!(tag.name.as_deref(), name);
        assert_eq!(tag.omit_empty, omit_empty);
    }
}
