// src/domain/wire/xml.rs
use crate::domain::wire::WireError;
use crate::domain::wire::envelope::{ContentItem, PSC_CODES, SERVICES, WireEnvelope};
use crate::domain::wire::fields::{Placeline, WRITETHRU_TYPE};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub const ENCODING: &str = "utf-8";

struct EnvelopeWriter {
    inner: Writer<Vec<u8>>,
}

impl EnvelopeWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), WireError> {
        self.inner
            .write_event(event)
            .map_err(|err| WireError::Serialization(err.to_string()))
    }

    fn declaration(&mut self) -> Result<(), WireError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some(ENCODING), None)))
    }

    fn open(&mut self, name: &str) -> Result<(), WireError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<(), WireError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `None` becomes a self-closing element.
    fn element(&mut self, name: &str, value: Option<&str>) -> Result<(), WireError> {
        match value {
            None => self.write(Event::Empty(BytesStart::new(name))),
            Some(text) => {
                self.open(name)?;
                self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
                self.close(name)
            }
        }
    }

    fn text(&mut self, name: &str, value: &str) -> Result<(), WireError> {
        self.element(name, Some(value))
    }

    fn finish(self) -> Result<String, WireError> {
        let mut bytes = self.inner.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|_| WireError::Encoding)
    }
}

impl WireEnvelope {
    /// Pretty-printed UTF-8 document with an XML declaration.
    pub fn to_xml(&self) -> Result<String, WireError> {
        let mut w = EnvelopeWriter::new();
        w.declaration()?;
        w.open("Publish")?;
        write_content(&mut w, &self.content)?;
        w.text("Reschedule", "false")?;
        w.text("IsRegional", "false")?;
        w.text("CanAutoRoute", "true")?;
        w.text("PublishID", &self.publish_id.to_string())?;
        w.text("Services", SERVICES)?;
        w.element("Username", None)?;
        w.text("UseLocalsOut", "false")?;
        w.text("PscCodes", PSC_CODES)?;
        w.text("PublishDateTime", &self.publish_date_time)?;
        w.close("Publish")?;
        w.finish()
    }
}

fn write_content(w: &mut EnvelopeWriter, item: &ContentItem) -> Result<(), WireError> {
    w.open("ContentItem")?;
    w.element("Name", None)?;
    w.text("Cachable", "false")?;
    w.text("ContentItemID", &item.content_item_id)?;
    w.text("FileName", &item.family_id)?;
    w.text("NewsCompID", &item.family_id)?;
    w.text("SystemSlug", &item.family_id)?;
    w.text("EmbargoTime", &item.embargo_time)?;
    w.text("CreatedDateTime", &item.created_date_time)?;
    w.text("UpdatedDateTime", &item.updated_date_time)?;
    w.text("ContentType", &item.content_type)?;
    w.element("Headline", item.headline.as_deref())?;
    w.element("SlugProper", item.slug_proper.as_deref())?;
    w.element("Credit", item.credit.as_deref())?;
    w.element("Source", item.source.as_deref())?;
    w.element("EditorNote", item.editor_note.as_deref())?;
    w.element("Length", item.word_count.as_deref())?;
    w.element("WordCount", item.word_count.as_deref())?;
    w.element("BreakWordCount", item.word_count.as_deref())?;
    w.text("DirectoryText", &item.directory_text)?;
    w.text("ContentText", &item.content_text)?;

    if let Some(headline2) = &item.headline2 {
        w.text("Headline2", headline2)?;
    }
    if let Some(categories) = &item.categories {
        w.text("Category", &categories.primary)?;
        w.text("IndexCode", &categories.index_code)?;
    }

    w.text("RankingValue", &item.ranking.value.to_string())?;
    if let Some(label) = &item.ranking.label {
        w.text("Ranking", label)?;
    }
    if let Some(keyword) = &item.keyword {
        w.text("Keyword", keyword)?;
    }

    write_placeline(w, &item.placeline)?;

    w.text("WritethruValue", &item.writethru.value.to_string())?;
    if let Some(ordinal) = &item.writethru.ordinal {
        w.text("WritethruNum", ordinal)?;
        w.text("WriteThruType", WRITETHRU_TYPE)?;
    }
    w.close("ContentItem")
}

fn write_placeline(w: &mut EnvelopeWriter, placeline: &Placeline) -> Result<(), WireError> {
    match placeline {
        Placeline::Unknown => w.element("Placeline", None),
        Placeline::Located {
            city,
            province,
            country,
            placeline,
            coordinates,
        } => {
            w.element("City", city.as_deref())?;
            w.element("Province", province.as_deref())?;
            w.element("Country", country.as_deref())?;
            w.text("Placeline", placeline)?;
            if let Some(coordinates) = coordinates {
                w.text("Latitude", &coordinates.latitude)?;
                w.text("Longitude", &coordinates.longitude)?;
            }
            Ok(())
        }
    }
}
