use datepat::{CalendarDate, DateField, LocaleDateDetector, ParseOutcome, PatternCodec, PatternSpec, YearStyle};

/// What a piece of report text means; each role maps to one SGR code.
#[derive(Clone, Copy)]
enum Role {
    Title,
    Section,
    Key,
    Result,
    Problem,
    Note,
}

impl Role {
    fn sgr(self) -> &'static str {
        match self {
            Role::Title => "1;36",
            Role::Section => "90",
            Role::Key => "1",
            Role::Result => "32",
            Role::Problem => "33",
            Role::Note => "2",
        }
    }
}

struct Styler {
    color: bool,
}

impl Styler {
    fn new(color: bool) -> Self {
        Styler { color }
    }

    fn style(&self, text: impl AsRef<str>, role: Role) -> String {
        let text = text.as_ref();
        if self.color { format!("\x1b[{}m{text}\x1b[0m", role.sgr()) } else { text.to_string() }
    }

    fn title(&self, text: impl AsRef<str>) {
        println!("\n{}", self.style(text, Role::Title));
    }

    fn section(&self, name: &str) {
        println!("\n{}", self.style(format!("━━━ {name} ━━━"), Role::Section));
    }

    /// `sample → rendered` line closing every explanation.
    fn example(&self, sample: &CalendarDate, rendered: String) {
        self.section("Example");
        println!("  {} → {}", sample.to_iso_string(), self.style(rendered, Role::Result));
    }
}

pub fn print_outcome(text: &str, outcome: &ParseOutcome, color: bool) {
    let styler = Styler::new(color);
    let line = match outcome {
        ParseOutcome::Parsed(date) => styler.style(date.to_iso_string(), Role::Result),
        ParseOutcome::Empty => styler.style("(empty)", Role::Note),
        ParseOutcome::Pending => styler.style("(pending)", Role::Note),
        ParseOutcome::Invalid => styler.style(format!("✗ \"{text}\" does not fit the display pattern"), Role::Problem),
    };
    println!("{line}");
}

pub fn print_pattern(codec: &PatternCodec, sample: &CalendarDate, color: bool) {
    let styler = Styler::new(color);
    let spec = codec.spec();
    styler.title(format!("⚙  Pattern: \"{}\"", spec.raw()));

    styler.section("Layout");
    let separator = match spec.separator() {
        Some(separator) => format!("'{separator}'"),
        None => styler.style("none (fixed-width fields)", Role::Note),
    };
    println!("  {:<10} {:?}", "layout", spec.layout());
    println!("  {:<10} {separator}", "separator");

    styler.section("Fields");
    for (slot, field) in spec.field_order().into_iter().enumerate() {
        let style = match field {
            DateField::Day => format!("{:?}", spec.day_style()),
            DateField::Month => format!("{:?}", spec.month_style()),
            DateField::Year => format!("{:?}", spec.year_style()),
        };
        println!("  {}. {:<6} {}", slot + 1, styler.style(field.to_string(), Role::Key), styler.style(style, Role::Note));
    }

    if spec.year_style() == YearStyle::Short {
        print_century(spec, &styler);
    }

    styler.example(sample, codec.format(sample));
    if spec.uses_month_names() {
        println!("  {}", styler.style(format!("month names: {}", codec.month_names().join(", ")), Role::Note));
    }
    println!();
}

fn print_century(spec: &PatternSpec, styler: &Styler) {
    let Some(window) = spec.century() else {
        return;
    };
    styler.section("Century");
    println!(
        "  suffix {}  │  00 → {}  │  {:02} → {}  │  99 → {}",
        styler.style(window.to_suffix(), Role::Key),
        window.resolve(0),
        window.boundary_year,
        window.resolve(i32::from(window.boundary_year)),
        window.resolve(99),
    );
}

pub fn print_locale(detector: &LocaleDateDetector, sample: &CalendarDate, color: bool) {
    let styler = Styler::new(color);
    styler.title(format!("⚙  Locale: {}", detector.locale()));

    styler.section("Detected layout");
    match (detector.field_order(), detector.regex()) {
        (Some(order), Some(regex)) => {
            let order: Vec<String> = order.iter().map(ToString::to_string).collect();
            println!("  {:<6} {}", "order", order.join(" · "));
            println!("  {:<6} {}", "regex", styler.style(regex, Role::Note));
        }
        _ => {
            println!("  {}", styler.style("Could not locate day, month and year in the locale's rendering", Role::Problem));
            println!("  {}", styler.style("Every parse will be rejected; set a display pattern instead", Role::Note));
        }
    }

    styler.example(sample, detector.format(sample));
    println!();
}
