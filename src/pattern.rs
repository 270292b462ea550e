//! Display patterns: grammar, compiler and codec.
//!
//! A display pattern is a short string that fully describes how a date is shown
//! in (and read back from) a text field. It is the one wire format shared with
//! stored configurations, so the grammar below must keep parsing identically.
//!
//! ```text
//!  [sep] tok tok tok [century]
//!    │    │   │   │      │
//!    │    │   │   │      └─ only with `0y`: sign + 2 digits century + 2 digits boundary
//!    │    └───┴───┴──────── 0d _d | 0M _M mM | 0y _y   (each field exactly once)
//!    └───────────────────── one char; present iff the pattern is 7 or 12 chars long
//!
//!  "-0d0M0y"      → 05-03-24          (separated, short year, default century)
//!  ".0d0M_y"      → 05.03.2024
//!  "_y0M0d"       → 20240305          (packed)
//!  " _dmM_y"      → 5 March 2024      (month names)
//!  "/0d0M0y+2140" → 05/03/24          (short year, anchored below boundary 40)
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! raw &str ── PatternSpec::compile ──▶ PatternSpec ──┐
//!                                                    │ + month names
//!                                                    v
//!                                              PatternCodec
//!                                        format(&CalendarDate) -> String
//!                                        parse(&str, &Context) -> ParseOutcome
//! ```
//!
//! ## Responsibilities by module
//!
//! - `spec.rs`: the grammar; turns a raw string into an immutable `PatternSpec`.
//! - `century.rs`: two-digit year expansion (`CenturyWindow`).
//! - `codec.rs`: formatting and parsing for both layouts.
//! - `builder.rs`: typed construction of pattern strings plus presets.

#[path = "pattern/builder.rs"]
mod builder;
#[path = "pattern/century.rs"]
mod century;
#[path = "pattern/codec.rs"]
mod codec;
#[path = "pattern/spec.rs"]
mod spec;


pub use builder::{DisplayOrder, SimpleDatePattern, presets};
pub use century::CenturyWindow;
pub use codec::PatternCodec;
pub use spec::{DateField, DayStyle, FieldSet, Layout, MonthStyle, PatternSpec, YearStyle};
