//! Descriptor and generic signature utilities.
//!
//! Pure string transforms over the compact type encodings used inside class
//! files:
//!
//! - field descriptors: `I`, `[J`, `Ljava/lang/String;`, `[[La/B;`
//! - method descriptors: `(ILa/B;)[J`
//! - generic signatures: `<T:Ljava/lang/Object;>La/Base<TT;>;La/I<*>;`
//!
//! The `map_*` functions rewrite every embedded internal class name through a
//! caller-supplied closure and leave everything else (array prefixes, primitive
//! tokens, type variables, wildcards) byte-for-byte intact. They return `None`
//! for malformed input so callers can decide how to degrade.

/// Single-character descriptors of the primitive types and `void`.
pub const PRIMITIVE_DESCRIPTORS: &[u8] = b"VZCBSIFJD";

/// True if `c` is a primitive (or `void`) descriptor character.
pub fn is_primitive(c: u8) -> bool {
    PRIMITIVE_DESCRIPTORS.contains(&c)
}

/// True for method descriptors and method signatures.
pub fn is_method_descriptor(desc: &str) -> bool {
    desc.starts_with('(') || (desc.starts_with('<') && desc.contains('('))
}

/// Split leading array dimensions off a descriptor: `[[La/B;` -> `(2, "La/B;")`.
pub fn strip_array(desc: &str) -> (usize, &str) {
    let element = desc.trim_start_matches('[');
    (desc.len() - element.len(), element)
}

/// Unwrap an object descriptor: `La/B;` -> `a/B`.
pub fn object_internal_name(desc: &str) -> Option<&str> {
    desc.strip_prefix('L')?.strip_suffix(';')
}

/// Wrap an internal name as an object descriptor: `a/B` -> `La/B;`.
pub fn object_descriptor(internal_name: &str) -> String {
    format!("L{};", internal_name)
}

/// Element class of an array or object descriptor, if it has one.
///
/// `[[La/B;` -> `a/B`, `La/B;` -> `a/B`, `[I` -> `None`.
pub fn element_class(desc: &str) -> Option<&str> {
    object_internal_name(strip_array(desc).1)
}

/// Split the first field descriptor off `s`, returning it and the remainder.
///
/// `ILa/B;J` -> `("I", "La/B;J")`.
pub fn next_field_type(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let dims = bytes.iter().take_while(|&&b| b == b'[').count();
    let end = match *bytes.get(dims)? {
        b'L' => dims + s[dims..].find(';')? + 1,
        c if is_primitive(c) && c != b'V' => dims + 1,
        _ => return None,
    };
    Some(s.split_at(end))
}

/// Split a method descriptor into parameter descriptors and return descriptor.
///
/// ```
/// use classforge_types::descriptor::parse_method_descriptor;
///
/// let (params, ret) = parse_method_descriptor("(I[La/B;)V").unwrap();
/// assert_eq!(params, vec!["I", "[La/B;"]);
/// assert_eq!(ret, "V");
/// ```
pub fn parse_method_descriptor(desc: &str) -> Option<(Vec<&str>, &str)> {
    let rest = desc.strip_prefix('(')?;
    let close = rest.find(')')?;
    let (mut params_str, ret) = (&rest[..close], &rest[close + 1..]);

    let mut params = Vec::new();
    while !params_str.is_empty() {
        let (param, remainder) = next_field_type(params_str)?;
        params.push(param);
        params_str = remainder;
    }

    if ret != "V" {
        let (_, remainder) = next_field_type(ret)?;
        if !remainder.is_empty() {
            return None;
        }
    }
    Some((params, ret))
}

/// Rewrite the class name embedded in a field descriptor.
pub fn map_field_descriptor<F>(desc: &str, map_class: &mut F) -> Option<String>
where
    F: FnMut(&str) -> String,
{
    let (dims, element) = strip_array(desc);
    let mut out = String::with_capacity(desc.len());
    out.push_str(&desc[..dims]);

    match element.as_bytes() {
        [c] if is_primitive(*c) => out.push_str(element),
        [b'L', ..] => {
            let internal = object_internal_name(element)?;
            if internal.is_empty() || internal.contains(';') {
                return None;
            }
            out.push('L');
            out.push_str(&map_class(internal));
            out.push(';');
        }
        _ => return None,
    }
    Some(out)
}

/// Rewrite every class name in a method descriptor.
pub fn map_method_descriptor<F>(desc: &str, map_class: &mut F) -> Option<String>
where
    F: FnMut(&str) -> String,
{
    let (params, ret) = parse_method_descriptor(desc)?;
    let mut out = String::with_capacity(desc.len());
    out.push('(');
    for param in params {
        out.push_str(&map_field_descriptor(param, map_class)?);
    }
    out.push(')');
    out.push_str(&map_field_descriptor(ret, map_class)?);
    Some(out)
}

/// Rewrite every class name in a generic signature.
///
/// Handles class signatures (with formal type parameters), method signatures
/// (including `^` throws clauses) and field/type signatures. Inner class
/// segments (`LOuter<TT;>.Inner;`) are mapped through their binary name
/// `Outer$Inner`, keeping only the simple part of the result.
pub fn map_signature<F>(signature: &str, map_class: &mut F) -> Option<String>
where
    F: FnMut(&str) -> String,
{
    let mut mapper = SignatureMapper {
        src: signature,
        pos: 0,
        out: String::with_capacity(signature.len()),
        map_class,
    };
    mapper.signature()?;
    Some(mapper.out)
}

struct SignatureMapper<'s, 'f, F> {
    src: &'s str,
    pos: usize,
    out: String,
    map_class: &'f mut F,
}

impl<'s, F> SignatureMapper<'s, '_, F>
where
    F: FnMut(&str) -> String,
{
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn copy_byte(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.out.push(c as char);
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, c: u8) -> Option<()> {
        (self.copy_byte()? == c).then_some(())
    }

    /// Read an identifier up to (not including) any of `stops`.
    fn identifier(&mut self, stops: &[u8]) -> Option<&'s str> {
        let start = self.pos;
        let len = self.src[start..]
            .bytes()
            .position(|b| stops.contains(&b))?;
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&self.src[start..start + len])
    }

    fn signature(&mut self) -> Option<()> {
        if self.peek() == Some(b'<') {
            self.formal_type_parameters()?;
        }

        if self.peek() == Some(b'(') {
            self.copy_byte()?;
            while self.peek()? != b')' {
                self.type_signature()?;
            }
            self.copy_byte()?;
            self.type_signature()?;
            while self.peek() == Some(b'^') {
                self.copy_byte()?;
                self.type_signature()?;
            }
        } else {
            self.type_signature()?;
            while self.peek().is_some() {
                self.type_signature()?;
            }
        }

        (self.pos == self.src.len()).then_some(())
    }

    fn formal_type_parameters(&mut self) -> Option<()> {
        self.expect(b'<')?;
        while self.peek()? != b'>' {
            let name = self.identifier(b":")?;
            self.out.push_str(name);
            while self.peek() == Some(b':') {
                self.copy_byte()?;
                // The class bound may be empty (`T::Ljava/lang/Comparable;`).
                if matches!(self.peek()?, b'L' | b'[' | b'T') {
                    self.type_signature()?;
                }
            }
        }
        self.expect(b'>')
    }

    fn type_signature(&mut self) -> Option<()> {
        match self.peek()? {
            c if is_primitive(c) => {
                self.copy_byte()?;
            }
            b'[' => {
                self.copy_byte()?;
                self.type_signature()?;
            }
            b'T' => {
                self.copy_byte()?;
                let var = self.identifier(b";")?;
                self.out.push_str(var);
                self.expect(b';')?;
            }
            b'L' => self.class_type_signature()?,
            _ => return None,
        }
        Some(())
    }

    fn class_type_signature(&mut self) -> Option<()> {
        self.pos += 1;
        let mut binary_name = self.identifier(b"<.;")?.to_string();
        let mapped = (self.map_class)(&binary_name);
        self.out.push('L');
        self.out.push_str(&mapped);

        loop {
            match self.peek()? {
                b'<' => self.type_arguments()?,
                b'.' => {
                    self.pos += 1;
                    let inner = self.identifier(b"<.;")?;
                    binary_name = format!("{}${}", binary_name, inner);
                    let mapped = (self.map_class)(&binary_name);
                    let simple = if mapped == binary_name {
                        inner
                    } else {
                        mapped
                            .rsplit(|c| c == '$' || c == '/')
                            .next()
                            .unwrap_or(inner)
                    };
                    self.out.push('.');
                    self.out.push_str(simple);
                }
                b';' => {
                    self.copy_byte()?;
                    return Some(());
                }
                _ => return None,
            }
        }
    }

    fn type_arguments(&mut self) -> Option<()> {
        self.expect(b'<')?;
        while self.peek()? != b'>' {
            match self.peek()? {
                b'*' => {
                    self.copy_byte()?;
                }
                b'+' | b'-' => {
                    self.copy_byte()?;
                    self.type_signature()?;
                }
                _ => self.type_signature()?,
            }
        }
        self.expect(b'>')
    }
}
