use std::io::{self, Write};

use crate::objects::{Dict, ObjId, Object};

/// Low-level PDF serializer. Writes indirect objects to any `Write` target
/// while tracking the byte offset of each one for the cross-reference table.
pub struct PdfWriter<W: Write> {
    sink: W,
    written: usize,
    /// Byte offset of each object, indexed by object number. Index 0 is the
    /// reserved free-entry head and stays `None`.
    offsets: Vec<Option<usize>>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(sink: W) -> Self {
        PdfWriter {
            sink,
            written: 0,
            offsets: Vec::new(),
        }
    }

    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> io::Result<()> {
        self.put(s.as_bytes())
    }

    /// Write the PDF 1.7 header, followed by the conventional comment with
    /// four bytes above 127 so transports treat the file as binary.
    pub fn header(&mut self) -> io::Result<()> {
        self.put(b"%PDF-1.7\n")?;
        self.put(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object, recording its offset for the xref table.
    pub fn object(&mut self, id: ObjId, body: &Object) -> io::Result<()> {
        let at = self.written;
        let idx = id.0 as usize;
        if self.offsets.len() <= idx {
            self.offsets.resize(idx + 1, None);
        }
        self.offsets[idx] = Some(at);

        self.put_str(&format!("{id} obj\n"))?;
        self.emit(body)?;
        self.put_str("\nendobj\n")
    }

    fn emit(&mut self, obj: &Object) -> io::Result<()> {
        match obj {
            Object::Null => self.put_str("null"),
            Object::Boolean(true) => self.put_str("true"),
            Object::Boolean(false) => self.put_str("false"),
            Object::Integer(n) => self.put_str(&n.to_string()),
            Object::Real(v) => self.put_str(&format_number(*v)),
            Object::Name(n) => {
                self.put_str("/")?;
                self.put_str(n)
            }
            Object::Text(s) => {
                self.put_str("(")?;
                self.put_str(&escape_text(s))?;
                self.put_str(")")
            }
            Object::Array(items) => {
                self.put_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.put_str(" ")?;
                    }
                    self.emit(item)?;
                }
                self.put_str("]")
            }
            Object::Dict(dict) => self.emit_dict(dict),
            Object::Stream { dict, data } => {
                self.put_str("<<")?;
                for (key, value) in &dict.0 {
                    self.put_str(" /")?;
                    self.put_str(key)?;
                    self.put_str(" ")?;
                    self.emit(value)?;
                }
                self.put_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.put(data)?;
                self.put_str("\nendstream")
            }
            Object::Ref(id) => self.put_str(&format!("{id} R")),
        }
    }

    fn emit_dict(&mut self, dict: &Dict) -> io::Result<()> {
        self.put_str("<<")?;
        for (key, value) in &dict.0 {
            self.put_str(" /")?;
            self.put_str(key)?;
            self.put_str(" ")?;
            self.emit(value)?;
        }
        self.put_str(" >>")
    }

    /// Write the xref table, trailer, startxref and `%%EOF`. Every entry is
    /// exactly 20 bytes as the format requires.
    pub fn finish(&mut self, root: ObjId, info: Option<ObjId>) -> io::Result<()> {
        let xref_at = self.written;
        let size = self.offsets.len().max(1);

        self.put_str(&format!("xref\n0 {size}\n"))?;
        self.put(b"0000000000 65535 f\r\n")?;
        for num in 1..size {
            match self.offsets[num] {
                Some(at) => self.put(format!("{at:010} 00000 n\r\n").as_bytes())?,
                None => self.put(b"0000000000 00000 f\r\n")?,
            }
        }

        self.put_str(&format!("trailer\n<< /Size {size} /Root {root} R"))?;
        if let Some(info) = info {
            self.put_str(&format!(" /Info {info} R"))?;
        }
        self.put_str(" >>\n")?;
        self.put_str(&format!("startxref\n{xref_at}\n%%EOF\n"))
    }

    /// Return the inner writer, consuming this PdfWriter.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Escape the characters with special meaning inside a PDF literal string.
pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Format a number the way content streams and object bodies expect: no
/// exponent, no trailing zeros, integers without a decimal point.
pub(crate) fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
