//! Runtime view of record fields.
//!
//! Rust has no runtime struct introspection, so records describe themselves:
//! `#[derive(Record)]` emits a `'static` table of [`FieldDescriptor`]s plus an
//! accessor that turns each field into a borrowed [`Value`]. Rules only ever see
//! these views; they can read the record but never mutate it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Declared metadata for one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            type_name,
            tags,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field type as written in the struct declaration.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All `(schema, expression)` pairs attached to the field.
    pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Rule expression attached under `schema`, if any.
    pub fn tag(&self, schema: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(s, _)| *s == schema)
            .map(|(_, expr)| *expr)
    }
}

/// Kind of a [`Value`], used for dispatch inside rules and in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    Char,
    Ptr,
    Seq,
    Map,
    Record,
    Unit,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Int => "signed integer",
            Kind::Uint => "unsigned integer",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::Ptr => "pointer",
            Kind::Seq => "sequence",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Unit => "unit",
        };
        f.write_str(name)
    }
}

/// Borrowed, dynamically typed view of a value.
#[derive(Clone)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    /// One level of nil-able indirection (`Option<T>`).
    Ptr(Option<Box<Value<'a>>>),
    Seq(Vec<Value<'a>>),
    Map(Vec<(Value<'a>, Value<'a>)>),
    Record(&'a dyn Record),
    Unit,
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Str(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::Ptr(_) => Kind::Ptr,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Unit => Kind::Unit,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Ptr(None))
    }

    /// Unwrap one level of pointer indirection. Returns `None` for a nil
    /// pointer and the value itself for everything else.
    pub fn indirect(&self) -> Option<&Value<'a>> {
        match self {
            Value::Ptr(Some(inner)) => Some(inner.as_ref()),
            Value::Ptr(None) => None,
            other => Some(other),
        }
    }

    /// Whether this is the zero/empty value for its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Int(n) => *n == 0,
            Value::Uint(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::Bool(b) => !*b,
            Value::Char(c) => *c == '\0',
            Value::Ptr(p) => p.is_none(),
            Value::Seq(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(_) | Value::Unit => false,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(*s),
            _ => None,
        }
    }

    /// Signed and unsigned integers widened to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(n) => Some(i128::from(*n)),
            Value::Uint(n) => Some(i128::from(*n)),
            _ => None,
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Ptr(a), Value::Ptr(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => records_equal(*a, *b),
            (Value::Unit, Value::Unit) => true,
            _ => false,
        }
    }
}

fn records_equal(a: &dyn Record, b: &dyn Record) -> bool {
    if a.record_name() != b.record_name() || a.fields() != b.fields() {
        return false;
    }
    (0..a.fields().len()).all(|idx| a.field(idx) == b.field(idx))
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Ptr(None) => f.write_str("nil"),
            Value::Ptr(Some(inner)) => write!(f, "&{:?}", inner),
            Value::Seq(items) => f.debug_list().entries(items).finish(),
            Value::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v)))
                .finish(),
            Value::Record(record) => {
                let mut s = f.debug_struct(record.record_name());
                for (idx, desc) in record.fields().iter().enumerate() {
                    if let Some(v) = record.field(idx) {
                        s.field(desc.name(), &v);
                    }
                }
                s.finish()
            }
            Value::Unit => f.write_str("()"),
        }
    }
}

/// Produces a [`Value`] view of `self`.
pub trait Reflect {
    fn reflect(&self) -> Value<'_>;
}

/// A record shaped value: a fixed list of named fields, usually implemented by
/// `#[derive(Record)]`.
pub trait Record: Reflect {
    /// Type name of the record.
    fn record_name(&self) -> &'static str;

    /// Descriptor table in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Value of the field at `index` in [`Record::fields`].
    fn field(&self, index: usize) -> Option<Value<'_>>;

    /// Value of the field called `name`.
    fn field_by_name(&self, name: &str) -> Option<Value<'_>> {
        let index = self.fields().iter().position(|f| f.name() == name)?;
        self.field(index)
    }
}

impl fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.reflect(), f)
    }
}

macro_rules! reflect_int {
    ($variant:ident, $wide:ty => $($ty:ty),+) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Value<'_> {
                    Value::$variant(<$wide>::from(*self))
                }
            }
        )+
    };
}

reflect_int!(Int, i64 => i8, i16, i32, i64);
reflect_int!(Uint, u64 => u8, u16, u32, u64);

impl Reflect for isize {
    fn reflect(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl Reflect for usize {
    fn reflect(&self) -> Value<'_> {
        Value::Uint(*self as u64)
    }
}

impl Reflect for f32 {
    fn reflect(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Reflect for char {
    fn reflect(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Reflect for () {
    fn reflect(&self) -> Value<'_> {
        Value::Unit
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value<'_> {
        Value::Str(self.as_str())
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Value<'_> {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Ptr(self.as_ref().map(|v| Box::new(v.reflect())))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value<'_> {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn reflect(&self) -> Value<'_> {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value<'_> {
        Value::Map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value<'_> {
        Value::Map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(crate::Record)]
    struct Point {
        #[check(geo = "required")]
        x: i32,
        y: i32,
    }

    #[derive(crate::Record)]
    struct Labelled {
        label: String,
        point: Point,
    }

    #[test]
    fn descriptor_tag_lookup() {
        const TAGS: &[(&str, &str)] = &[("a", "required"), ("b", "min=2")];
        let desc = FieldDescriptor::new("name", "String", TAGS);
        assert_eq!(desc.tag("b"), Some("min=2"));
        assert_eq!(desc.tag("c"), None);
        assert_eq!(desc.name(), "name");
        assert_eq!(desc.type_name(), "String");
    }

    #[test]
    fn option_reflects_as_pointer() {
        let some = Some(String::from("x"));
        let none: Option<String> = None;
        assert_eq!(some.reflect().kind(), Kind::Ptr);
        assert_eq!(some.reflect().indirect(), Some(&Value::Str("x")));
        assert!(none.reflect().is_nil());
        assert!(none.reflect().indirect().is_none());
    }

    #[test]
    fn box_is_transparent() {
        let boxed: Box<u8> = Box::new(7);
        assert_eq!(boxed.reflect(), Value::Uint(7));
    }

    #[test]
    fn zero_values() {
        assert!(String::new().reflect().is_zero());
        assert!(!" ".reflect().is_zero());
        assert!(0i32.reflect().is_zero());
        assert!(false.reflect().is_zero());
        assert!(Vec::<u8>::new().reflect().is_zero());
        assert!(!vec![1u8].reflect().is_zero());
        assert!(HashMap::<String, u8>::new().reflect().is_zero());
    }

    #[test]
    fn integers_widen() {
        assert_eq!((-3i8).reflect().as_integer(), Some(-3));
        assert_eq!(u64::MAX.reflect().as_integer(), Some(i128::from(u64::MAX)));
        assert_eq!("7".reflect().as_integer(), None);
    }

    #[test]
    fn derived_records_expose_fields() {
        let p = Point { x: 1, y: 2 };
        assert_eq!(p.record_name(), "Point");
        assert_eq!(p.fields().len(), 2);
        assert_eq!(p.fields()[0].tag("geo"), Some("required"));
        assert_eq!(p.field_by_name("y"), Some(Value::Int(2)));
        assert_eq!(p.field_by_name("z"), None);
        assert_eq!(p.field(2), None);
        assert_eq!(p.reflect().kind(), Kind::Record);
    }

    #[test]
    fn records_compare_deeply() {
        let a = Labelled {
            label: "origin".into(),
            point: Point { x: 0, y: 0 },
        };
        let b = Labelled {
            label: "origin".into(),
            point: Point { x: 0, y: 0 },
        };
        let c = Labelled {
            label: "origin".into(),
            point: Point { x: 0, y: 1 },
        };
        assert_eq!(a.reflect(), b.reflect());
        assert_ne!(a.reflect(), c.reflect());
        assert_ne!(a.reflect(), a.point.reflect());
    }

    #[test]
    fn mismatched_kinds_are_unequal() {
        assert_ne!(1i32.reflect(), 1u32.reflect());
        assert_ne!("1".reflect(), 1u32.reflect());
        assert_eq!(Some(1u8).reflect(), Some(1u8).reflect());
        assert_eq!(None::<u8>.reflect(), None::<u8>.reflect());
    }

    #[test]
    fn debug_renders_records() {
        let p = Point { x: 1, y: 2 };
        assert_eq!(format!("{:?}", p.reflect()), "Point { x: 1, y: 2 }");
        assert_eq!(format!("{:?}", None::<u8>.reflect()), "nil");
    }
}
