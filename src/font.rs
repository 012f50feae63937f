use std::path::Path;

use xmlwriter::{Indent, Options, XmlWriter};

use crate::{FontOptions, IconFontError};

const XML_PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\" >\n",
);

/// One `<glyph>` element of the output font
#[derive(Debug, Clone, PartialEq)]
pub struct FontRecord {
    pub glyph_name: String,
    pub code_point: u32,
    pub advance_width: f64,
    /// Path data in font units, y up
    pub path_data: String,
}

/// An SVG font document under construction
#[derive(Debug, Clone)]
pub struct SvgFont {
    pub font_id: String,
    pub units_per_em: u16,
    pub ascent: i32,
    pub descent: i32,
    pub records: Vec<FontRecord>,
}

impl SvgFont {
    pub fn new(options: &FontOptions) -> Self {
        SvgFont {
            font_id: options.font_id.clone(),
            units_per_em: options.units_per_em,
            ascent: i32::from(options.units_per_em),
            descent: i32::from(options.descent),
            records: vec![],
        }
    }

    pub fn push(&mut self, record: FontRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the whole font. Records are written in the order they were
    /// pushed.
    pub fn to_svg_string(&self) -> String {
        let mut xml = XmlWriter::new(Options {
            indent: Indent::Spaces(2),
            ..Options::default()
        });
        xml.start_element("svg");
        xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");
        xml.start_element("defs");

        xml.start_element("font");
        xml.write_attribute("id", &self.font_id);
        xml.write_attribute("horiz-adv-x", &self.units_per_em);

        xml.start_element("font-face");
        xml.write_attribute("font-family", &self.font_id);
        xml.write_attribute("units-per-em", &self.units_per_em);
        xml.write_attribute("ascent", &self.ascent);
        xml.write_attribute("descent", &self.descent);
        xml.end_element();

        xml.start_element("missing-glyph");
        xml.write_attribute("horiz-adv-x", "0");
        xml.end_element();

        for record in &self.records {
            xml.start_element("glyph");
            xml.write_attribute("glyph-name", &record.glyph_name);
            // A character reference keeps control and markup characters out
            // of the attribute value
            xml.write_attribute_fmt("unicode", format_args!("&#x{:04X};", record.code_point));
            xml.write_attribute_fmt("horiz-adv-x", format_args!("{:.0}", record.advance_width));
            xml.write_attribute("d", &record.path_data);
            xml.end_element();
        }

        let mut out = String::from(XML_PROLOGUE);
        out.push_str(&xml.end_document());
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IconFontError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg_string())?;
        log::info!("Wrote {} glyphs to {}", self.records.len(), path.display());
        Ok(())
    }
}
