// src/export/pdf.rs

use crate::core::image::{decode_payload, encode_jpeg};
use crate::errors::{AppError, AppResult};
use crate::export::print_view::{PrintCard, PrintView};
use crate::ui::messages::warning;
use image::{ColorType, GenericImageView};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const CARDS_PER_ROW: usize = 3;
const EMBED_QUALITY: u8 = 85;

/// JPEG ready to be embedded as an image XObject.
struct PdfImage {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    gap: f32,
    card_h: f32,
    heading_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    heading_font_size: f32,
    title_font_size: f32,

    /// Images placed on the page being drawn: (resource name, object).
    page_images: Vec<(String, Ref)>,
    image_count: usize,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ID gestiti a mano
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            gap: 12.0,
            card_h: 210.0,
            heading_h: 22.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 10.0,
            heading_font_size: 12.0,
            title_font_size: 18.0,

            page_images: Vec::new(),
            image_count: 0,
        }
    }

    /// Genera un nuovo Ref univoco
    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn content_w(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    fn card_w(&self) -> f32 {
        (self.content_w() - self.gap * (CARDS_PER_ROW as f32 - 1.0)) / CARDS_PER_ROW as f32
    }

    /// Write the page object for `content`, with the fonts and the images
    /// drawn on it as resources.
    fn finalize_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let pages_id = self.pages_id;
        let font_id = self.font_id;
        let bold_font_id = self.bold_font_id;
        let media_box = Rect::new(0.0, 0.0, self.page_w, self.page_h);
        let images = std::mem::take(&mut self.page_images);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(pages_id).media_box(media_box).contents(content_id);

            let mut resources = page.resources();
            resources
                .fonts()
                .pair(Name(b"F1"), font_id)
                .pair(Name(b"F2"), bold_font_id);

            if !images.is_empty() {
                let mut x_objects = resources.x_objects();
                for (name, id) in &images {
                    x_objects.pair(Name(name.as_bytes()), *id);
                }
            }
        }

        self.pdf.stream(content_id, &content.finish());
    }

    /// Imposta il nodo `Pages` con count e kids
    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        rgb: (f32, f32, f32),
        text: &str,
    ) {
        let font = if bold { Name(b"F2") } else { Name(b"F1") };
        let bytes = win_ansi(text);

        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
        content.restore_state();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn stroke_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.80, 0.82, 0.85);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Title and the four metadata fields; returns the y below the block.
    fn draw_header(&self, content: &mut Content, view: &PrintView) -> f32 {
        let mut y = self.page_h - self.margin - self.title_font_size;
        let title_x = (self.page_w - text_width(&view.title, self.title_font_size)) / 2.0;
        self.draw_text(
            content,
            title_x,
            y,
            self.title_font_size,
            true,
            (0.12, 0.23, 0.54),
            &view.title,
        );

        y -= 28.0;
        let col_w = self.content_w() / 2.0;

        for (i, (label, value)) in view.header.iter().enumerate() {
            let x = self.margin + col_w * (i % 2) as f32;
            let row_y = y - 16.0 * (i / 2) as f32;
            let label = format!("{label}:");
            self.draw_text(content, x, row_y, self.font_size, true, (0.0, 0.0, 0.0), &label);
            self.draw_text(
                content,
                x + text_width(&label, self.font_size) + 6.0,
                row_y,
                self.font_size,
                false,
                (0.0, 0.0, 0.0),
                value,
            );
        }

        let rows = view.header.len().div_ceil(2) as f32;
        y - 16.0 * rows - 10.0
    }

    fn draw_heading(&self, content: &mut Content, y_top: f32, heading: &str) {
        let y = y_top - self.heading_h;
        self.fill_rect(content, self.margin, y, self.content_w(), self.heading_h, (0.88, 0.91, 1.0));
        self.draw_text(
            content,
            self.margin + 8.0,
            y + 7.0,
            self.heading_font_size,
            true,
            (0.12, 0.23, 0.54),
            heading,
        );
    }

    fn draw_card(&mut self, content: &mut Content, x: f32, y_top: f32, card: &PrintCard) {
        let w = self.card_w();
        let h = self.card_h;
        let y = y_top - h;

        self.stroke_rect(content, x, y, w, h);

        let accent = if card.kind.is_entrada() {
            (0.12, 0.23, 0.54)
        } else {
            (0.98, 0.57, 0.24)
        };
        self.fill_rect(content, x, y, 4.0, h, accent);
        self.draw_text(
            content,
            x + 12.0,
            y_top - 18.0,
            self.font_size + 1.0,
            true,
            accent,
            &card.kind.as_str().to_uppercase(),
        );

        // image box
        let box_x = x + 12.0;
        let box_w = w - 20.0;
        let box_top = y_top - 28.0;
        let box_h = h - 56.0;

        match self.place_image(card) {
            Some((name, img_w, img_h)) => {
                let scale = (box_w / img_w as f32).min(box_h / img_h as f32);
                let dw = img_w as f32 * scale;
                let dh = img_h as f32 * scale;
                let dx = box_x + (box_w - dw) / 2.0;
                let dy = box_top - box_h + (box_h - dh) / 2.0;

                content.save_state();
                content.transform([dw, 0.0, 0.0, dh, dx, dy]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
            None => {
                self.fill_rect(content, box_x, box_top - box_h, box_w, box_h, (0.96, 0.96, 0.96));
                let label = "Sem imagem";
                self.draw_text(
                    content,
                    box_x + (box_w - text_width(label, self.font_size)) / 2.0,
                    box_top - box_h / 2.0,
                    self.font_size,
                    false,
                    (0.55, 0.55, 0.55),
                    label,
                );
            }
        }

        self.draw_text(
            content,
            x + 12.0,
            y + 10.0,
            self.font_size,
            false,
            (0.2, 0.2, 0.2),
            &card.date_label,
        );
    }

    /// Embed the card's photo; `None` when there is none or it cannot be read.
    fn place_image(&mut self, card: &PrintCard) -> Option<(String, u32, u32)> {
        if card.image_data.is_empty() {
            return None;
        }

        let img = match prepare_image(&card.image_data) {
            Ok(img) => img,
            Err(e) => {
                warning(format!("Entry {}: image skipped ({e})", card.entry_id));
                return None;
            }
        };

        let id = self.fresh_ref();
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);

        let mut xobj = self.pdf.image_xobject(id, &img.jpeg);
        xobj.filter(Filter::DctDecode);
        xobj.width(img.width as i32);
        xobj.height(img.height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        drop(xobj);

        self.page_images.push((name.clone(), id));
        Some((name, img.width, img.height))
    }

    /// Render the whole view, breaking pages between card rows.
    pub fn write_view(&mut self, view: &PrintView) {
        let mut content = Content::new();
        let mut y = self.draw_header(&mut content, view);
        let bottom = self.margin;

        if view.groups.is_empty() {
            self.draw_text(
                &mut content,
                self.margin,
                y - 20.0,
                self.font_size,
                false,
                (0.4, 0.4, 0.4),
                "Nenhum registro.",
            );
        }

        for group in &view.groups {
            // keep a heading together with its first row of cards
            if y - self.heading_h - self.gap - self.card_h < bottom {
                self.finalize_page(content);
                content = Content::new();
                y = self.page_h - self.margin;
            }

            self.draw_heading(&mut content, y, &group.heading);
            y -= self.heading_h + self.gap;

            for row in group.cards.chunks(CARDS_PER_ROW) {
                if y - self.card_h < bottom {
                    self.finalize_page(content);
                    content = Content::new();
                    y = self.page_h - self.margin;
                }

                for (i, card) in row.iter().enumerate() {
                    let x = self.margin + (self.card_w() + self.gap) * i as f32;
                    self.draw_card(&mut content, x, y, card);
                }
                y -= self.card_h + self.gap;
            }

            y -= self.gap;
        }

        self.finalize_page(content);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        // Costruisci Catalog + Pages una sola volta, qui
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Decode a payload and make sure it is an RGB baseline JPEG.
fn prepare_image(image_data: &str) -> AppResult<PdfImage> {
    let (mime, bytes) = decode_payload(image_data)?;
    let img = image::load_from_memory(&bytes).map_err(|e| AppError::ImageDecode(e.to_string()))?;
    let (width, height) = img.dimensions();

    let jpeg = if mime.eq_ignore_ascii_case("image/jpeg") && img.color() == ColorType::Rgb8 {
        bytes
    } else {
        encode_jpeg(&img, EMBED_QUALITY)?
    };

    Ok(PdfImage {
        jpeg,
        width,
        height,
    })
}

/// Helvetica is set up with WinAnsiEncoding: Latin-1 maps one to one,
/// anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code < 0x80 || (0xA0..=0xFF).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Rough Helvetica width, good enough for centering.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.52
}
