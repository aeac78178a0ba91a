//! # 4.3, 4.4 Dumper
//!
//! Recursive walk of a `Slice` tree, writing JSON or VJSON text into a `Sink`.

mod escape;
mod number;
mod vjson;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::options::{Options, UnsupportedTypeBehavior};
use crate::sink::Sink;
use crate::slice::Slice;
use crate::value_type::ValueType;

/// Which dialect [`Dumper::dump_value`] renders the four extended types (String, UTCDate,
/// Binary, Custom) as.
///
/// # 9. Design notes — virtual dispatch on dumper dialect
///
/// The reference implementation dispatches between a `Dumper` base class and a `VJsonDumper`
/// subclass. This crate instead carries the dialect as a tag on one `Dumper` type, matched
/// inside `dump_value`; object keys always render through `DumpTarget::Json`'s policy
/// regardless of the Dumper's configured target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpTarget {
    Json,
    VJson,
}

/// Walks a `Slice` tree and writes its JSON or VJSON rendering into a `Sink`.
///
/// # 3.3 Dumper state
///
/// Holds a reference to a `Sink`, a reference to an immutable `Options` record, and an
/// indentation depth counter. No other mutable state is kept between calls; two `Dumper`s over
/// disjoint `Sink`s and byte ranges can run independently with no coordination (§5).
pub struct Dumper<'o, 's> {
    options: &'o Options,
    sink: &'s mut dyn Sink,
    target: DumpTarget,
    indentation: usize,
}

impl<'o, 's> Dumper<'o, 's> {
    /// A `Dumper` that renders plain JSON, nullifying/failing/converting unsupported types per
    /// `options.unsupported_type_behavior`.
    pub fn new(options: &'o Options, sink: &'s mut dyn Sink) -> Dumper<'o, 's> {
        Dumper::with_target(options, sink, DumpTarget::Json)
    }

    /// A `Dumper` that renders the VJSON dialect, tagging String/UTCDate/Binary/Custom values.
    pub fn new_vjson(options: &'o Options, sink: &'s mut dyn Sink) -> Dumper<'o, 's> {
        Dumper::with_target(options, sink, DumpTarget::VJson)
    }

    pub fn with_target(options: &'o Options, sink: &'s mut dyn Sink, target: DumpTarget) -> Dumper<'o, 's> {
        Dumper {
            options,
            sink,
            target,
            indentation: 0,
        }
    }

    pub fn options(&self) -> &Options {
        self.options
    }

    pub fn target(&self) -> DumpTarget {
        self.target
    }

    /// Write the JSON/VJSON text for `root` into this dumper's sink.
    ///
    /// Recursion depth equals the document's nesting depth (§5); callers processing untrusted
    /// input should budget stack accordingly.
    pub fn dump(&mut self, root: Slice<'_>) -> Result<()> {
        self.indentation = 0;
        debug!("dumping {:?} value as {:?}", root.kind()?, self.target);
        self.dump_value(root, root)
    }

    /// Recursive internal form. `base` is the enclosing container, threaded through only so a
    /// `Custom` handler can inspect it (§4.3).
    pub fn dump_value(&mut self, slice: Slice<'_>, base: Slice<'_>) -> Result<()> {
        if self.target == DumpTarget::VJson {
            match slice.kind()? {
                ValueType::String => {
                    return vjson::dump_string(self.sink, slice.get_string()?, self.options)
                }
                ValueType::UtcDate => {
                    return vjson::dump_utc_date(self.sink, slice.get_utc_date()?)
                }
                ValueType::Binary => {
                    vjson::dump_binary(self.sink, slice.get_binary()?);
                    return Ok(());
                }
                ValueType::Custom => {
                    vjson::dump_custom(self.sink, slice.raw_bytes()?);
                    return Ok(());
                }
                _ => {} // falls through to the plain JSON table below
            }
        }

        match slice.kind()? {
            ValueType::Null => self.sink.append(b"null"),
            ValueType::Bool => {
                if slice.get_bool()? {
                    self.sink.append(b"true");
                } else {
                    self.sink.append(b"false");
                }
            }
            ValueType::Double => {
                let value = slice.get_double()?;
                if value.is_finite() {
                    number::append_double(self.sink, value);
                } else {
                    self.handle_unsupported_type(slice)?;
                }
            }
            ValueType::Int | ValueType::UInt | ValueType::SmallInt => {
                number::append_integer(self.sink, slice)?;
            }
            ValueType::String => {
                let bytes = slice.get_string()?;
                self.sink.reserve(2 + bytes.len());
                self.sink.push_back(b'"');
                escape::dump_string(self.sink, bytes, self.options)?;
                self.sink.push_back(b'"');
            }
            ValueType::Array => self.dump_array(slice)?,
            ValueType::Object => self.dump_object(slice)?,
            ValueType::External => {
                let target = slice.get_external()?;
                self.dump_value(target, base)?;
            }
            ValueType::Custom => {
                let handler = self.options.custom_type_handler.clone();
                match handler {
                    Some(handler) => handler.dump(slice, self, base)?,
                    None => return Err(Error::NeedCustomTypeHandler),
                }
            }
            ValueType::Bcd => {
                warn!("BCD dump requested; unimplemented");
                return Err(Error::NotImplemented);
            }
            ValueType::None
            | ValueType::Illegal
            | ValueType::MinKey
            | ValueType::MaxKey
            | ValueType::UtcDate
            | ValueType::Binary => {
                self.handle_unsupported_type(slice)?;
            }
        }
        Ok(())
    }

    /// # 4.3.2 handle_unsupported_type
    fn handle_unsupported_type(&mut self, slice: Slice<'_>) -> Result<()> {
        match self.options.unsupported_type_behavior {
            UnsupportedTypeBehavior::FailOnUnsupported => {
                let kind = slice.kind()?;
                warn!("no JSON equivalent for {kind:?}");
                Err(Error::NoJsonEquivalent { kind })
            }
            UnsupportedTypeBehavior::NullifyUnsupported => {
                self.sink.append(b"null");
                Ok(())
            }
            UnsupportedTypeBehavior::ConvertUnsupported => self.convert_single_value(slice),
        }
    }

    /// Render exactly one value through the VJSON policy, regardless of this dumper's
    /// configured target, for the `ConvertUnsupported` policy.
    ///
    /// The VJSON dialect (§4.4) only tags `String`, `UTCDate`, `Binary` and `Custom` — `Custom`
    /// never reaches here (it has its own `NeedCustomTypeHandler` path), and non-finite
    /// `Double`s and the structurally empty types (`None`, `Illegal`, `MinKey`, `MaxKey`) have
    /// no VJSON representation either. This implementation nullifies those rather than
    /// failing, since `ConvertUnsupported` is an explicit request for a best-effort rendering.
    fn convert_single_value(&mut self, slice: Slice<'_>) -> Result<()> {
        match slice.kind()? {
            ValueType::UtcDate => vjson::dump_utc_date(self.sink, slice.get_utc_date()?),
            ValueType::Binary => {
                vjson::dump_binary(self.sink, slice.get_binary()?);
                Ok(())
            }
            _ => {
                self.sink.append(b"null");
                Ok(())
            }
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indentation {
            self.sink.append(b"  ");
        }
    }

    fn dump_array(&mut self, slice: Slice<'_>) -> Result<()> {
        let length = slice.array_length()?;
        self.sink.push_back(b'[');
        if length == 0 {
            self.sink.push_back(b']');
            return Ok(());
        }

        if self.options.pretty_print {
            self.sink.push_back(b'\n');
            self.indentation += 1;
            for index in 0..length {
                self.write_indent();
                self.dump_value(slice.at(index)?, slice)?;
                if index + 1 != length {
                    self.sink.push_back(b',');
                }
                self.sink.push_back(b'\n');
            }
            self.indentation -= 1;
            self.write_indent();
        } else {
            for index in 0..length {
                if index != 0 {
                    self.sink.push_back(b',');
                }
                self.dump_value(slice.at(index)?, slice)?;
            }
        }
        self.sink.push_back(b']');
        Ok(())
    }

    fn dump_object(&mut self, slice: Slice<'_>) -> Result<()> {
        let length = slice.object_length()?;
        self.sink.push_back(b'{');
        if length == 0 {
            self.sink.push_back(b'}');
            return Ok(());
        }

        if self.options.pretty_print {
            self.sink.push_back(b'\n');
            self.indentation += 1;
            for index in 0..length {
                self.write_indent();
                self.dump_key(slice.key_at(index)?)?;
                self.sink.append(b" : ");
                self.dump_value(slice.value_at(index)?, slice)?;
                if index + 1 != length {
                    self.sink.push_back(b',');
                }
                self.sink.push_back(b'\n');
            }
            self.indentation -= 1;
            self.write_indent();
        } else {
            for index in 0..length {
                if index != 0 {
                    self.sink.push_back(b',');
                }
                self.dump_key(slice.key_at(index)?)?;
                self.sink.push_back(b':');
                self.dump_value(slice.value_at(index)?, slice)?;
            }
        }
        self.sink.push_back(b'}');
        Ok(())
    }

    /// Object keys always render as a pure JSON string, never through the VJSON tagging
    /// policy, so output stays valid JSON regardless of the active dialect (§4.3, Object).
    fn dump_key(&mut self, key: Slice<'_>) -> Result<()> {
        let bytes = key.get_string()?;
        self.sink.push_back(b'"');
        escape::dump_string(self.sink, bytes, self.options)?;
        self.sink.push_back(b'"');
        Ok(())
    }
}
