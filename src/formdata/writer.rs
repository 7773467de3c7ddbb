// Frames `multipart/form-data` bodies in memory. Writes to the buffer cannot fail, so the only
// errors the encoder reports come from reading upload sources.

pub(crate) struct MultipartWriter {
    boundary: String,
    buf: Vec<u8>,
    parts: usize,
}

impl MultipartWriter {
    pub(crate) fn new() -> Self {
        Self::with_boundary(uuid::Uuid::new_v4().simple().to_string())
    }

    pub(crate) fn with_boundary(boundary: String) -> Self {
        MultipartWriter {
            boundary,
            buf: Vec::new(),
            parts: 0,
        }
    }

    pub(crate) fn boundary(&self) -> &str {
        &self.boundary
    }

    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary())
    }

    pub(crate) fn write_field(&mut self, name: &str, value: &str) {
        self.open_part();
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quotes(name)
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub(crate) fn write_file(&mut self, name: &str, filename: &str, contents: &[u8]) {
        let mime = mime_guess::from_path(filename).first_or_octet_stream();

        self.open_part();
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                escape_quotes(name),
                escape_quotes(filename),
                mime.essence_str(),
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(contents);
    }

    /// Writes the closing delimiter and hands back the body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if self.parts > 0 {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }

    fn open_part(&mut self) {
        if self.parts > 0 {
            self.buf.extend_from_slice(b"\r\n");
        }
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.parts += 1;
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod writer_test {
    use super::*;

    #[test]
    fn frames_fields_and_files() {
        let mut writer = MultipartWriter::with_boundary("xyz".to_string());
        writer.write_field("prompt", "a cat");
        writer.write_file("image", "cat.png", b"PNG");
        let body = writer.finish();

        let expected = "--xyz\r\n\
            Content-Disposition: form-data; name=\"prompt\"\r\n\r\n\
            a cat\r\n\
            --xyz\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"cat.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNG\r\n\
            --xyz--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn empty_form_is_only_the_close_delimiter() {
        let writer = MultipartWriter::with_boundary("xyz".to_string());
        assert_eq!(writer.finish(), b"--xyz--\r\n");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        let mut writer = MultipartWriter::with_boundary("b".to_string());
        writer.write_file("file", "tmp3k2j", b"");
        let body = String::from_utf8(writer.finish()).unwrap();

        assert!(body.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(escape_quotes(r#"a"b\c"#), r#"a\"b\\c"#);
    }

    #[test]
    fn random_boundary_is_hex() {
        let writer = MultipartWriter::new();

        assert_eq!(writer.boundary().len(), 32);
        assert!(writer.boundary().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            writer.content_type(),
            format!("multipart/form-data; boundary={}", writer.boundary())
        );
    }
}
