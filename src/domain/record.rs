//! Record adapter: builds a [`Tree`] from record-shaped values.
//!
//! Types take part by implementing [`Inspect`], which describes a value either
//! as a record (an ordered list of [`Field`]s) or as a scalar with a display
//! text. Fields carry their declared name, an optional display-name override,
//! and the omit-if-empty flag, usually set from a tag spec via [`Field::tag`].
//!
//! ```
//! use treeprint::{from_record, Field, Inspect, Shape, TreeMode};
//!
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! impl Inspect for Person {
//!     fn shape(&self) -> Shape<'_> {
//!         Shape::Record(vec![
//!             Field::new("Name", &self.name).tag("name"),
//!             Field::new("Nickname", &self.nickname).tag("nick,omitempty"),
//!         ])
//!     }
//! }
//!
//! let person = Person { name: "Max".into(), nickname: None };
//! let tree = from_record(&person, TreeMode::Value).unwrap();
//! assert_eq!(tree.render(), ".\n└── [Max]  name\n");
//! ```

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Cursor, Tree};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tag::FieldTag;

/// Nesting limit used by [`from_record`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What a leaf field contributes to the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    /// Field names only
    Name,
    /// Field names annotated with their values
    #[default]
    Value,
}

impl FromStr for TreeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(TreeMode::Name),
            "value" => Ok(TreeMode::Value),
            other => Err(format!("unknown tree mode: {other}")),
        }
    }
}

impl fmt::Display for TreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMode::Name => f.write_str("name"),
            TreeMode::Value => f.write_str("value"),
        }
    }
}

/// Structural description of a value.
pub enum Shape<'a> {
    /// Named fields in declaration order
    Record(Vec<Field<'a>>),
    /// Leaf value with its display text and whether it counts as empty
    Scalar { text: String, empty: bool },
}

/// Capability to describe a value to the record adapter.
pub trait Inspect {
    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn shape(&self) -> Shape<'_>;

    /// Whether an omit-if-empty field holding this value is skipped.
    ///
    /// Scalars report their own zero state. Records are never empty, however
    /// many of their fields are.
    fn is_empty(&self) -> bool {
        match self.shape() {
            Shape::Scalar { empty, .. } => empty,
            Shape::Record(_) => false,
        }
    }
}

/// One field of a record.
pub struct Field<'a> {
    name: &'a str,
    rename: Option<String>,
    omit_empty: bool,
    value: &'a dyn Inspect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            rename: None,
            omit_empty: false,
            value,
        }
    }

    /// Apply a tag spec such as `"inner_one,omitempty"`.
    pub fn tag(mut self, spec: &str) -> Self {
        let tag = FieldTag::parse(spec);
        self.rename = tag.name;
        self.omit_empty = tag.omit_empty;
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Override if present and not blank, declared name otherwise.
    pub fn display_name(&self) -> &str {
        self.rename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.name)
    }

    pub fn is_omit_empty(&self) -> bool {
        self.omit_empty
    }

    pub fn value(&self) -> &'a dyn Inspect {
        self.value
    }
}

/// See [`Inspect::is_empty`].
pub fn is_empty_value(value: &dyn Inspect) -> bool {
    value.is_empty()
}

/// Best-effort display text of any inspectable value.
pub fn value_text(value: &dyn Inspect) -> String {
    shape_text(value.shape())
}

fn shape_text(shape: Shape<'_>) -> String {
    match shape {
        Shape::Scalar { text, .. } => text,
        Shape::Record(fields) => format!(
            "{{{}}}",
            fields
                .iter()
                .map(|field| format!("{}: {}", field.display_name(), value_text(field.value)))
                .join(", ")
        ),
    }
}

/// Build a tree from a record with the default nesting limit.
pub fn from_record(value: &dyn Inspect, mode: TreeMode) -> DomainResult<Tree> {
    from_record_with(value, mode, DEFAULT_MAX_DEPTH)
}

/// Build a tree from a record.
///
/// Fails with [`DomainError::UnsupportedValueKind`] if `value` is not a record.
/// Failures inside nested records are wrapped with the name of the field that
/// led there. Either the whole tree is built or none is returned.
#[instrument(level = "debug", skip(value))]
pub fn from_record_with(value: &dyn Inspect, mode: TreeMode, max_depth: usize) -> DomainResult<Tree> {
    let Shape::Record(fields) = value.shape() else {
        return Err(DomainError::UnsupportedValueKind(value.type_name().to_string()));
    };

    let adapter = RecordAdapter { mode, max_depth };
    let mut tree = Tree::new();
    adapter.walk(&mut tree.cursor(), fields, 0)?;
    debug!(nodes = tree.len(), depth = tree.depth(), "record adapted");
    Ok(tree)
}

/// Convenience: value-mode rendering, or the error message if adaptation fails.
pub fn repr(value: &dyn Inspect) -> String {
    match from_record(value, TreeMode::Value) {
        Ok(tree) => tree.render(),
        Err(e) => e.to_string(),
    }
}

struct RecordAdapter {
    mode: TreeMode,
    max_depth: usize,
}

impl RecordAdapter {
    fn walk(&self, cursor: &mut Cursor<'_>, fields: Vec<Field<'_>>, depth: usize) -> DomainResult<()> {
        if depth >= self.max_depth {
            return Err(DomainError::DepthExceeded(self.max_depth));
        }

        for field in fields {
            let name = field.display_name();
            if field.omit_empty && is_empty_value(field.value) {
                trace!(field = name, "omitting empty field");
                continue;
            }

            match field.value.shape() {
                Shape::Record(nested) if !nested.is_empty() => {
                    let mut branch = cursor.add_branch(name);
                    self.walk(&mut branch, nested, depth + 1)
                        .map_err(|e| DomainError::Field {
                            field: name.to_string(),
                            source: Box::new(e),
                        })?;
                }
                shape => match self.mode {
                    TreeMode::Name => {
                        cursor.add_node(name);
                    }
                    TreeMode::Value => {
                        cursor.add_meta_node(shape_text(shape), name);
                    }
                },
            }
        }
        Ok(())
    }
}

macro_rules! inspect_scalar {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar {
                        text: self.to_string(),
                        empty: *self == $zero,
                    }
                }
            }
        )*
    };
}

inspect_scalar!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
    bool => false,
    char => '\0',
);

impl Inspect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar {
            text: self.to_string(),
            empty: self.is_empty(),
        }
    }
}

impl Inspect for String {
    fn shape(&self) -> Shape<'_> {
        self.as_str().shape()
    }
}

/// A record without fields.
impl Inspect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(Vec::new())
    }
}

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar {
            text: format!(
                "[{}]",
                self.iter().map(|item| value_text(item)).join(", ")
            ),
            empty: self.is_empty(),
        }
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

/// One level of optional indirection: `None` is an empty `<nil>` scalar,
/// `Some` takes the shape of its content but is never empty, even around a
/// zero value.
impl<T: Inspect> Inspect for Option<T> {
    fn type_name(&self) -> &'static str {
        match self {
            Some(inner) => inner.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => inner.shape(),
            None => Shape::Scalar {
                text: "<nil>".to_string(),
                empty: true,
            },
        }
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Bio {
        age: u32,
        city: String,
        meta: Vec<u8>,
    }

    impl Inspect for Bio {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(vec![
                Field::new("Age", &self.age),
                Field::new("City", &self.city),
                Field::new("Meta", &self.meta),
            ])
        }
    }

    struct Person {
        name: String,
        bio: Bio,
    }

    impl Inspect for Person {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(vec![Field::new("Name", &self.name), Field::new("Bio", &self.bio)])
        }
    }

    struct Tagged {
        label: String,
        optional: Option<String>,
    }

    impl Inspect for Tagged {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(vec![
                Field::new("Label", &self.label).tag("   "),
                Field::new("Optional", &self.optional).tag("opt,omitempty"),
            ])
        }
    }

    fn person() -> Person {
        Person {
            name: "Max".into(),
            bio: Bio {
                age: 100,
                city: "NYC".into(),
                meta: b"hello".to_vec(),
            },
        }
    }

    #[test]
    fn given_record_in_value_mode_then_meta_holds_values() {
        let tree = from_record(&person(), TreeMode::Value).unwrap();
        let expected = "\
.
├── [Max]  Name
└── Bio
    ├── [100]  Age
    ├── [NYC]  City
    └── [[104, 101, 108, 108, 111]]  Meta
";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn given_record_in_name_mode_then_only_names() {
        let tree = from_record(&person(), TreeMode::Name).unwrap();
        assert_eq!(tree.render(), ".\n├── Name\n└── Bio\n    ├── Age\n    ├── City\n    └── Meta\n");
    }

    #[rstest]
    #[case(None, ".\n└── Label\n")]
    #[case(Some(String::new()), ".\n├── Label\n└── opt\n")]
    #[case(Some("x".to_string()), ".\n├── Label\n└── opt\n")]
    fn given_omit_empty_option_then_skipped_only_when_none(
        #[case] optional: Option<String>,
        #[case] expected: &str,
    ) {
        let value = Tagged {
            label: String::new(),
            optional,
        };
        assert_eq!(from_record(&value, TreeMode::Name).unwrap().render(), expected);
    }

    #[rstest]
    #[case(Some("display"), "display")]
    #[case(Some("  "), "Declared")]
    #[case(Some(""), "Declared")]
    #[case(None, "Declared")]
    fn given_rename_then_non_blank_override_wins(#[case] rename: Option<&str>, #[case] expected: &str) {
        let value = 1;
        let mut field = Field::new("Declared", &value);
        if let Some(rename) = rename {
            field = field.rename(rename);
        }
        assert_eq!(field.display_name(), expected);
    }

    #[test]
    fn given_scalar_at_top_level_then_unsupported_kind() {
        let err = from_record(&42_i32, TreeMode::Value).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedValueKind(ref kind) if kind == "i32"));
        assert_eq!(repr(&42_i32), "unsupported value kind: i32 is not a record");
    }

    #[test]
    fn given_nesting_beyond_limit_then_error_names_field() {
        let err = from_record_with(&person(), TreeMode::Value, 1).unwrap_err();
        match err {
            DomainError::Field { field, source } => {
                assert_eq!(field, "Bio");
                assert!(matches!(*source, DomainError::DepthExceeded(1)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case(&0_i32, true)]
    #[case(&"", true)]
    #[case(&Vec::<u8>::new(), true)]
    #[case(&None::<f64>, true)]
    #[case(&Some(0_i32), false)]
    #[case(&Some(String::new()), false)]
    #[case(&Some(()), false)]
    #[case(&(), false)]
    #[case(&Box::new(None::<u8>), true)]
    fn given_value_then_emptiness_matches_zero_state(#[case] value: &dyn Inspect, #[case] expected: bool) {
        assert_eq!(is_empty_value(value), expected);
    }

    #[test]
    fn given_all_zero_record_then_not_empty() {
        let bio = Bio {
            age: 0,
            city: String::new(),
            meta: vec![],
        };
        assert!(!is_empty_value(&bio));
    }

    #[test]
    fn given_record_value_then_text_lists_fields() {
        assert_eq!(value_text(&person().bio), "{Age: 100, City: NYC, Meta: [104, 101, 108, 108, 111]}");
    }
}
