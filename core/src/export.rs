//! Export collaborators — turn a finished EnergyDay into bytes for a
//! device or file. They only read the snapshot and never feed back.

use crate::{
    error::ReportResult,
    model::{format_hour, EnergyDay},
    render::evaluate_alerts,
};

pub trait ReportExporter {
    /// Short identifier, used for log lines and output file names.
    fn name(&self) -> &'static str;

    fn export(&self, day: &EnergyDay) -> ReportResult<Vec<u8>>;
}

/// Pretty-printed JSON of the whole snapshot.
pub struct JsonExporter;

impl ReportExporter for JsonExporter {
    fn name(&self) -> &'static str { "json" }

    fn export(&self, day: &EnergyDay) -> ReportResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(day)?)
    }
}

// ── ESC/POS ───────────────────────────────────────────────────────

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;
const LF: u8 = 0x0A;

/// Text-mode receipt for an ESC/POS thermal printer. Charts are not
/// rasterised; the receipt carries the header summary, the ranked
/// consumers, category shares and the checklist.
pub struct EscPosReceipt {
    /// Characters per printed line.
    pub columns: usize,
}

impl Default for EscPosReceipt {
    fn default() -> Self {
        Self { columns: 32 }
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left = 0,
    Center = 1,
}

struct Receipt {
    buf:     Vec<u8>,
    columns: usize,
}

impl Receipt {
    fn new(columns: usize) -> Self {
        // ESC @: initialise printer.
        Self { buf: vec![ESC, b'@'], columns }
    }

    fn bold(&mut self, on: bool) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, b'E', u8::from(on)]);
        self
    }

    fn align(&mut self, align: Align) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, b'a', align as u8]);
        self
    }

    fn line(&mut self, text: &str) -> &mut Self {
        let ascii = to_printer_ascii(text);
        let clipped: String = ascii.chars().take(self.columns).collect();
        self.buf.extend_from_slice(clipped.as_bytes());
        self.buf.push(LF);
        self
    }

    /// `left` padded so that `right` ends at the last column.
    fn pair(&mut self, left: &str, right: &str) -> &mut Self {
        let left = to_printer_ascii(left);
        let right = to_printer_ascii(right);
        let room = self.columns.saturating_sub(right.len() + 1);
        let left: String = left.chars().take(room).collect();
        let pad = self.columns.saturating_sub(left.len() + right.len());
        let text = format!("{left}{}{right}", " ".repeat(pad));
        self.line(&text)
    }

    fn divider(&mut self) -> &mut Self {
        let dashes = "-".repeat(self.columns);
        self.line(&dashes)
    }

    fn finish(mut self) -> Vec<u8> {
        // Feed three lines, then GS V 66 0 (partial cut).
        self.buf.extend_from_slice(&[LF, LF, LF, GS, b'V', 66, 0]);
        self.buf
    }
}

impl ReportExporter for EscPosReceipt {
    fn name(&self) -> &'static str { "escpos" }

    fn export(&self, day: &EnergyDay) -> ReportResult<Vec<u8>> {
        let mut r = Receipt::new(self.columns);
        let (peak_hour, peak) = day.peak();

        r.align(Align::Center).bold(true).line("Denní energetický report").bold(false);
        r.line(&day.building_name).line(&day.formatted_date());
        r.align(Align::Left).divider();

        r.pair("Celkem", &format!("{:.1} kWh", day.total_kwh()));
        r.pair("Náklady", &format!("{:.0} Kč", day.estimated_cost_czk()));
        r.pair("Cena", &format!("{:.2} Kč/kWh", day.price_czk_per_kwh));
        r.pair("Špička", &format!("{peak:.1} @ {}", format_hour(peak_hour)));
        r.divider();

        r.bold(true).line("Top spotřebiče").bold(false);
        for consumer in &day.top_consumers {
            r.pair(&consumer.name, &format!("{:.1}", consumer.kwh));
        }
        r.divider();

        let category_total = day.category_total_kwh();
        if category_total > 0.0 {
            r.bold(true).line("Kategorie").bold(false);
            for cat in &day.category_breakdown {
                r.pair(&cat.name, &format!("{:.0}%", 100.0 * cat.kwh / category_total));
            }
            r.divider();
        }

        for alert in evaluate_alerts(day) {
            let mark = if alert.ok { "[x]" } else { "[!]" };
            r.bold(!alert.ok).line(&format!("{mark} {}", alert.text)).bold(false);
        }

        let bytes = r.finish();
        log::debug!("escpos receipt: {} bytes for {}", bytes.len(), day.formatted_date());
        Ok(bytes)
    }
}

/// Fold Czech diacritics and other non-ASCII characters to what a
/// receipt printer in its default code page can print.
pub fn to_printer_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' => 'a', 'č' => 'c', 'ď' => 'd', 'é' | 'ě' => 'e', 'í' => 'i',
            'ň' => 'n', 'ó' => 'o', 'ř' => 'r', 'š' => 's', 'ť' => 't',
            'ú' | 'ů' => 'u', 'ý' => 'y', 'ž' => 'z',
            'Á' => 'A', 'Č' => 'C', 'Ď' => 'D', 'É' | 'Ě' => 'E', 'Í' => 'I',
            'Ň' => 'N', 'Ó' => 'O', 'Ř' => 'R', 'Š' => 'S', 'Ť' => 'T',
            'Ú' | 'Ů' => 'U', 'Ý' => 'Y', 'Ž' => 'Z',
            '×' => 'x',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}
