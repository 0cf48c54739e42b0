use crate::{
    refs::{ObjectReferences, RefType},
    PDFError,
};
use owned_ttf_parser::{name_id, AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// A parsed TrueType / OpenType font that will be embedded in the generated PDF.
///
/// The whole font program is embedded, so large CJK fonts make for large PDFs.
/// Text is encoded as 2-byte glyph ids (`Identity-H`); every glyph that passes
/// through [Font::encode] is remembered so that only those glyphs get width
/// and ToUnicode entries when the document is written.
pub struct Font {
    pub face: OwnedFace,
    path: Option<PathBuf>,
    used_glyphs: BTreeMap<u16, char>,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font {
            face,
            path: None,
            used_glyphs: BTreeMap::new(),
        })
    }

    /// Read and parse the font file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font, PDFError> {
        let path = path.as_ref();
        let mut font = Font::load(std::fs::read(path)?)?;
        font.path = Some(path.to_path_buf());
        Ok(font)
    }

    /// The file this font was read from, if it came from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn find_name(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The PostScript name of the font, falling back to its full name
    pub fn name(&self) -> Option<String> {
        self.find_name(name_id::POST_SCRIPT_NAME)
            .or_else(|| self.find_name(name_id::FULL_NAME))
    }

    /// The family name of the font
    pub fn family(&self) -> Option<String> {
        self.find_name(name_id::FAMILY)
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// Encode `text` as big-endian glyph ids. Characters the font cannot map
    /// become U+FFFD if the font has it, and `.notdef` otherwise.
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let ch = if ch == '\t' { ' ' } else { ch };
            let mapped = self
                .glyph_id(ch)
                .map(|gid| (gid, ch))
                .or_else(|| self.replacement_glyph_id().map(|gid| (gid, '\u{FFFD}')));
            let gid = match mapped {
                Some((gid, ch)) => {
                    self.used_glyphs.entry(gid).or_insert(ch);
                    gid
                }
                None => 0,
            };
            encoded.extend_from_slice(&gid.to_be_bytes());
        }
        encoded
    }

    /// Number of distinct glyphs encoded so far
    pub fn used_glyph_count(&self) -> usize {
        self.used_glyphs.len()
    }

    fn advance(&self, gid: u16) -> f32 {
        self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or(0) as f32 * self.scaling()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let base_font = self.base_font_name();
        let font_id = refs.gen(RefType::Font);
        let cid_font_id = refs.gen(RefType::CidFont);
        let descriptor_id = refs.gen(RefType::FontDescriptor);
        let data_id = refs.gen(RefType::FontData);
        let to_unicode_id = refs.gen(RefType::ToUnicode);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        font.finish();

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.advance(0));
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid_font.widths();
        for (start, run) in self.width_runs() {
            widths.consecutive(start, run);
        }
        widths.finish();
        cid_font.finish();

        self.write_descriptor(&base_font, descriptor_id, data_id, writer);

        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let cmap = miniz_oxide::deflate::compress_to_vec_zlib(
            self.to_unicode_cmap().as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(to_unicode_id, cmap.as_slice())
            .filter(Filter::FlateDecode);
    }

    fn base_font_name(&self) -> String {
        // names in the font dictionary must not contain whitespace
        self.name()
            .map(|name| name.split_whitespace().collect::<String>())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    /// Group the used glyphs into runs of consecutive ids, each with its widths
    fn width_runs(&self) -> Vec<(u16, Vec<f32>)> {
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for &gid in self.used_glyphs.keys() {
            let width = self.advance(gid);
            match runs.last_mut() {
                Some((start, run)) if *start as usize + run.len() == gid as usize => run.push(width),
                _ => runs.push((gid, vec![width])),
            }
        }
        runs
    }

    fn write_descriptor(
        &self,
        base_font: &str,
        id: pdf_writer::Ref,
        data_id: pdf_writer::Ref,
        writer: &mut Pdf,
    ) {
        let face = self.face();
        let scaling = self.scaling();
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_font.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // not recorded in TrueType fonts; 80 is the customary guess
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();
    }

    fn to_unicode_cmap(&self) -> String {
        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(&u16, &char)> = self.used_glyphs.iter().collect();
        for block in entries.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
        map
    }
}

/// One of the standard PDF fonts every reader ships with. These need no font
/// file, but can only show characters in the WinAnsi encoding.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinFont {
    #[default]
    Helvetica,
    Courier,
    TimesRoman,
}

impl BuiltinFont {
    /// The standard-14 base font name
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::TimesRoman => "Times-Roman",
        }
    }

    /// Encode `text` in WinAnsi. Tabs become spaces, anything else the
    /// encoding cannot represent becomes `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| if ch == '\t' { b' ' } else { winansi(ch).unwrap_or(b'?') })
            .collect()
    }

    /// Whether every character of `text` survives [BuiltinFont::encode]
    pub fn can_encode(&self, text: &str) -> bool {
        text.chars().all(|ch| ch == '\t' || winansi(ch).is_some())
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font);
        writer
            .type1_font(id)
            .base_font(Name(self.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

fn winansi(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' => Some(ch as u8),
        '\u{a0}'..='\u{ff}' => Some(ch as u32 as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        'ƒ' => Some(0x83),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '†' => Some(0x86),
        '‡' => Some(0x87),
        'ˆ' => Some(0x88),
        '‰' => Some(0x89),
        'Š' => Some(0x8a),
        '‹' => Some(0x8b),
        'Œ' => Some(0x8c),
        'Ž' => Some(0x8e),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '˜' => Some(0x98),
        '™' => Some(0x99),
        'š' => Some(0x9a),
        '›' => Some(0x9b),
        'œ' => Some(0x9c),
        'ž' => Some(0x9e),
        'Ÿ' => Some(0x9f),
        _ => None,
    }
}
