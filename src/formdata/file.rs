use std::{
    fs,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
    sync::Mutex,
};

use serde::{ser::SerializeTupleStruct, Serialize, Serializer};

/// Name of the tuple struct a [`FormFile`] serializes as. The form encoder recognises it and
/// writes a file part; other serializers see a plain `(filename, bytes)` pair.
pub(crate) const FILE_TOKEN: &str = "$oaikit::formdata::File";

/// Anything that can be uploaded as a file part: a readable stream with a name. Only the base
/// name (directories stripped) is sent as the part's filename.
pub trait UploadSource: Read + Send {
    fn name(&self) -> &str;
}

/// Pairs a reader with the name it should be uploaded under.
#[derive(Debug)]
pub struct NamedReader<R> {
    name: String,
    inner: R,
}

impl<R> NamedReader<R> {
    pub fn new<N: Into<String>>(name: N, inner: R) -> Self {
        NamedReader {
            name: name.into(),
            inner,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl NamedReader<fs::File> {
    /// Opens the file at `path`, named after that path.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        Ok(NamedReader::new(path.to_string_lossy(), file))
    }
}

impl<R: Read> Read for NamedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for NamedReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<R: Read + Send> UploadSource for NamedReader<R> {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A file field in a form payload.
///
/// Borrows the source for the duration of the request. Encoding reads the source from its
/// current position to the end; it never rewinds or closes it, so the caller keeps ownership
/// and decides what happens to the handle afterwards. Wrap it in `Option` for optional file
/// fields: `None` produces no part.
pub struct FormFile<'a> {
    source: Mutex<&'a mut (dyn UploadSource + 'a)>,
}

impl<'a> FormFile<'a> {
    pub fn new<S: UploadSource + 'a>(source: &'a mut S) -> Self {
        let source: &'a mut (dyn UploadSource + 'a) = source;
        FormFile {
            source: Mutex::new(source),
        }
    }
}

impl<'a, S: UploadSource + 'a> From<&'a mut S> for FormFile<'a> {
    fn from(source: &'a mut S) -> Self {
        FormFile::new(source)
    }
}

impl std::fmt::Debug for FormFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.source.lock() {
            Ok(source) => source.name().to_string(),
            Err(_) => "<poisoned>".to_string(),
        };
        f.debug_struct("FormFile").field("name", &name).finish()
    }
}

impl Serialize for FormFile<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error;

        let mut source = self
            .source
            .lock()
            .map_err(|_| S::Error::custom("upload source lock poisoned"))?;

        let filename = base_name(source.name()).to_string();
        let mut contents = Vec::new();
        source
            .read_to_end(&mut contents)
            .map_err(|e| S::Error::custom(format!("reading {filename}: {e}")))?;

        let mut state = serializer.serialize_tuple_struct(FILE_TOKEN, 2)?;
        state.serialize_field(&filename)?;
        state.serialize_field(&RawBytes(&contents))?;
        state.end()
    }
}

struct RawBytes<'a>(&'a [u8]);

impl Serialize for RawBytes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.0)
    }
}

fn base_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
}
