//! Typed, memoizing access to a borrowed JSON document
//!
//! Every response wrapper is a thin struct around a `JsonView`. The view reads
//! a key on first access, converts it, remembers the result, and hands the
//! remembered value back on every later access. It never copies the document.
//!
//! Missing data follows one policy:
//! - scalar accessors (`str`, `int`, `flag`) return `""`, `0` or `false`
//! - everything that may legitimately be absent (`opt_*`, `node`, `object`,
//!   `time`) returns `None`
//! - sequences (`children`) are empty

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::any::Any;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::rc::Rc;

/// Timestamp layout used by the API, e.g. `20240115T183045.000Z`
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.fZ";
const TIMESTAMP_FORMAT_NO_FRACTION: &str = "%Y%m%dT%H%M%SZ";

const NO_VALUES: &[Value] = &[];

/// Builds a typed wrapper from a borrowed JSON value
///
/// Construction must be cheap and perform no conversion; all work happens in
/// the wrapper's accessors.
pub trait FromJson<'a>: Sized {
    fn from_json(value: &'a Value) -> Self;
}

/// A converted field, as remembered by the view
#[derive(Clone)]
enum Slot<'a> {
    Str(&'a str),
    OptStr(Option<&'a str>),
    Int(i64),
    OptInt(Option<i64>),
    Flag(bool),
    Node(Option<&'a Value>),
    Time(Option<DateTime<Utc>>),
    Converted(Rc<dyn Any>),
}

/// Memoizing view over one JSON value
///
/// Keys may be dotted paths into nested objects (`"clan.tag"`). A path that
/// crosses a missing or non-object value resolves to nothing.
pub struct JsonView<'a> {
    value: &'a Value,
    memo: RefCell<HashMap<&'static str, Slot<'a>>>,
}

impl<'a> JsonView<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// The underlying JSON value
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Number of fields converted so far
    pub fn converted_fields(&self) -> usize {
        self.memo.borrow().len()
    }

    fn lookup(&self, path: &str) -> Option<&'a Value> {
        path.split('.')
            .try_fold(self.value, |value, key| value.get(key))
            .filter(|value| !value.is_null())
    }

    /// Returns the remembered value for `key`, converting and remembering it
    /// on first use
    fn cached<T: Copy>(
        &self,
        key: &'static str,
        read: fn(&Slot<'a>) -> Option<T>,
        store: fn(T) -> Slot<'a>,
        convert: impl FnOnce(Option<&'a Value>) -> T,
    ) -> T {
        if let Some(hit) = self.memo.borrow().get(key).and_then(read) {
            return hit;
        }

        let converted = convert(self.lookup(key));
        self.memo.borrow_mut().insert(key, store(converted));
        converted
    }

    /// String field, `""` when absent or not a string
    pub fn str(&self, key: &'static str) -> &'a str {
        self.cached(
            key,
            |slot| match slot {
                Slot::Str(s) => Some(*s),
                _ => None,
            },
            Slot::Str,
            |value| value.and_then(Value::as_str).unwrap_or_default(),
        )
    }

    /// String field, `None` when absent or not a string
    pub fn opt_str(&self, key: &'static str) -> Option<&'a str> {
        self.cached(
            key,
            |slot| match slot {
                Slot::OptStr(s) => Some(*s),
                _ => None,
            },
            Slot::OptStr,
            |value| value.and_then(Value::as_str),
        )
    }

    /// Integer field, `0` when absent or not numeric
    pub fn int(&self, key: &'static str) -> i64 {
        self.cached(
            key,
            |slot| match slot {
                Slot::Int(n) => Some(*n),
                _ => None,
            },
            Slot::Int,
            |value| value.and_then(to_int).unwrap_or_default(),
        )
    }

    /// Integer field, `None` when absent or not numeric
    pub fn opt_int(&self, key: &'static str) -> Option<i64> {
        self.cached(
            key,
            |slot| match slot {
                Slot::OptInt(n) => Some(*n),
                _ => None,
            },
            Slot::OptInt,
            |value| value.and_then(to_int),
        )
    }

    /// Boolean field, `false` when absent or not a boolean
    pub fn flag(&self, key: &'static str) -> bool {
        self.cached(
            key,
            |slot| match slot {
                Slot::Flag(b) => Some(*b),
                _ => None,
            },
            Slot::Flag,
            |value| value.and_then(Value::as_bool).unwrap_or_default(),
        )
    }

    /// Raw nested value, `None` when absent or null
    pub fn node(&self, key: &'static str) -> Option<&'a Value> {
        self.cached(
            key,
            |slot| match slot {
                Slot::Node(v) => Some(*v),
                _ => None,
            },
            Slot::Node,
            |value| value,
        )
    }

    /// Nested object wrapped as `W`, `None` when absent or not an object
    ///
    /// The wrapper is built on first access and kept in `slot`, so later calls
    /// return the same wrapper along with everything it has converted.
    pub fn object<'s, W: FromJson<'a>>(
        &self,
        slot: &'s Nested<W>,
        key: &'static str,
    ) -> Option<&'s W> {
        slot.cell
            .get_or_init(|| self.node(key).filter(|v| v.is_object()).map(W::from_json))
            .as_ref()
    }

    /// Timestamp field in the API's compact format
    ///
    /// `None` when absent or unparseable.
    pub fn time(&self, key: &'static str) -> Option<DateTime<Utc>> {
        self.cached(
            key,
            |slot| match slot {
                Slot::Time(t) => Some(*t),
                _ => None,
            },
            Slot::Time,
            |value| value.and_then(Value::as_str).and_then(parse_timestamp),
        )
    }

    /// Array field as a lazy sequence of `W`
    ///
    /// Each call starts a fresh traversal. Absent or non-array fields give an
    /// empty sequence.
    pub fn children<W: FromJson<'a>>(&self, key: &'static str) -> Children<'a, W> {
        Children::new(self.node(key))
    }

    /// Runs an arbitrary conversion over the whole value once and remembers it
    ///
    /// Use a key that no other accessor on this view uses.
    pub fn memo<T: Clone + 'static>(
        &self,
        key: &'static str,
        convert: impl FnOnce(&'a Value) -> T,
    ) -> T {
        if let Some(Slot::Converted(any)) = self.memo.borrow().get(key) {
            if let Some(hit) = any.downcast_ref::<T>() {
                return hit.clone();
            }
        }

        let converted = convert(self.value);
        self.memo
            .borrow_mut()
            .insert(key, Slot::Converted(Rc::new(converted.clone())));
        converted
    }
}

impl fmt::Debug for JsonView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonView")
            .field("value", self.value)
            .field("converted_fields", &self.converted_fields())
            .finish()
    }
}

impl<'a> FromJson<'a> for JsonView<'a> {
    fn from_json(value: &'a Value) -> Self {
        JsonView::new(value)
    }
}

/// Reads integers the API sometimes sends as floats or numeric strings
fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses the API's compact UTC timestamp, e.g. `20240115T183045.000Z`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT_NO_FRACTION))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Slot holding a nested wrapper once it has been built
///
/// Wrappers keep one per nested-object field and fill it through
/// `JsonView::object`.
pub struct Nested<W> {
    cell: OnceCell<Option<W>>,
}

impl<W> Default for Nested<W> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<W: fmt::Debug> fmt::Debug for Nested<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(built) => built.fmt(f),
            None => f.write_str("<unread>"),
        }
    }
}

/// Lazy sequence of wrappers over the elements of a JSON array
///
/// Elements are wrapped only as they are reached. Cloning gives an
/// independent cursor over the same elements.
pub struct Children<'a, W> {
    items: std::slice::Iter<'a, Value>,
    wrap: PhantomData<fn() -> W>,
}

impl<'a, W> Children<'a, W> {
    /// Sequence over `value` if it is an array, otherwise empty
    pub fn new(value: Option<&'a Value>) -> Self {
        let items = value
            .and_then(Value::as_array)
            .map(|array| array.as_slice())
            .unwrap_or(NO_VALUES);

        Self {
            items: items.iter(),
            wrap: PhantomData,
        }
    }
}

impl<W> Clone for Children<'_, W> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            wrap: PhantomData,
        }
    }
}

impl<W> fmt::Debug for Children<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("remaining", &self.items.len())
            .finish()
    }
}

impl<'a, W: FromJson<'a>> Iterator for Children<'a, W> {
    type Item = W;

    fn next(&mut self) -> Option<W> {
        self.items.next().map(W::from_json)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<W> {
        self.items.nth(n).map(W::from_json)
    }
}

impl<'a, W: FromJson<'a>> DoubleEndedIterator for Children<'a, W> {
    fn next_back(&mut self) -> Option<W> {
        self.items.next_back().map(W::from_json)
    }
}

impl<'a, W: FromJson<'a>> ExactSizeIterator for Children<'a, W> {}

impl<'a, W: FromJson<'a>> FusedIterator for Children<'a, W> {}
