//! Parts of an OPC package being written.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::rel::Relationships;

/// A single part: a named blob with a content type and its own relationships.
#[derive(Debug, Clone)]
pub struct Part {
    /// Absolute part name, e.g. `/ppt/slides/slide1.xml`
    partname: String,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    /// Create a part. The part name must be absolute.
    pub fn new(partname: &str, content_type: &str, blob: Vec<u8>) -> Result<Self> {
        if !partname.starts_with('/') || partname.ends_with('/') {
            return Err(OoxmlError::InvalidPartName(partname.to_string()));
        }
        Ok(Self {
            partname: partname.to_string(),
            content_type: content_type.to_string(),
            blob,
            rels: Relationships::new(),
        })
    }

    /// Create a part from generated XML text.
    pub fn xml(partname: &str, content_type: &str, xml: impl Into<String>) -> Result<Self> {
        Self::new(partname, content_type, xml.into().into_bytes())
    }

    #[inline]
    pub fn partname(&self) -> &str {
        &self.partname
    }

    /// ZIP member name (the part name without its leading slash).
    #[inline]
    pub fn membername(&self) -> &str {
        &self.partname[1..]
    }

    /// Extension of the part name, without the dot.
    pub fn ext(&self) -> &str {
        self.partname
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.contains('/'))
            .unwrap_or("")
    }

    /// ZIP member name of this part's relationships, e.g.
    /// `ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_membername(&self) -> String {
        let (dir, file) = self.partname.rsplit_once('/').unwrap_or(("", &self.partname));
        let dir = dir.trim_start_matches('/');
        if dir.is_empty() {
            format!("_rels/{}.rels", file)
        } else {
            format!("{}/_rels/{}.rels", dir, file)
        }
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Replace this part's relationships. Used when the part's XML refers to
    /// relationship IDs that had to be allocated first.
    pub fn with_rels(mut self, rels: Relationships) -> Self {
        self.rels = rels;
        self
    }
}
