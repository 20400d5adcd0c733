//! emissions_chart
//!
//! Legend registry, tooltip resolver and renderer for the Australian
//! greenhouse-gas emissions chart. Pairs with the `emissions-chart` CLI.
//!
//! ### Features
//! - Ordered, validated series table grouped by category (Variable, Scenarios,
//!   Targets, Uncertainty Range, Gases)
//! - Tooltip resolution for a hovered year, with the uncertainty band read
//!   from the dataset bounds from 2010 on
//! - Two-state tooltip gate driven by pointer events
//! - SVG/PNG rendering of the composed chart with a grouped legend
//!
//! ### Example
//! ```no_run
//! use emissions_chart::{LegendRegistry, chart, storage, tooltip};
//!
//! let records = storage::load_records("data/sample_emissions.csv")?;
//! let registry = LegendRegistry::australia();
//! let payload = chart::payload_for_year(&records, 2015);
//! if let Some(tip) = tooltip::render_tooltip(true, &payload, 2015, registry, &records) {
//!     for line in tip.lines("en") {
//!         println!("{}", line.text);
//!     }
//! }
//! emissions_chart::viz::plot_emissions(&records, registry, "emissions.svg", &Default::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod error;
pub mod format;
pub mod gate;
pub mod legend;
pub mod models;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use error::ConfigError;
pub use gate::{GateState, PointerEvent, TooltipGate};
pub use legend::{Category, IconStyle, LegendGroup, LegendRegistry, SeriesDescriptor};
pub use models::{EmissionsRecord, PayloadEntry};
pub use tooltip::{TooltipFragment, render_tooltip};
