// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Earthquake timeline demo: binds a small catalog, renders a point layer and a label layer
//! stratified by country, and writes the result to `quakeline_demo.svg`.
//!
//! Set `RUST_LOG=debug` to see per-layer render summaries.

mod svg;

use std::error::Error;
use std::sync::Arc;

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use quakeline_charts::{
    LayerOptions, Mapping, StrokeStyle, StyleOverrides, TimeAxisSpec, TimelineChartSpec,
    days_from_civil, geom_timeline, geom_timeline_label,
};
use quakeline_core::{
    Axis, ColumnTable, CoordinateMapper, DataValue, DrawOp, MarkId, TextAnchor, TextOp,
};
use tracing_subscriber::EnvFilter;

const OUTPUT: &str = "quakeline_demo.svg";

/// `(year, month, day, country, magnitude, deaths, location)`.
const EVENTS: &[(i64, u32, u32, &str, f64, f64, &str)] = &[
    (2004, 10, 23, "JAPAN", 6.6, 68.0, "Chuetsu"),
    (2004, 12, 26, "INDONESIA", 9.1, 227_898.0, "Sumatra"),
    (2006, 5, 26, "INDONESIA", 6.3, 5_749.0, "Yogyakarta"),
    (2008, 5, 12, "CHINA", 7.9, 87_652.0, "Wenchuan"),
    (2009, 9, 30, "INDONESIA", 7.6, 1_117.0, "Padang"),
    (2010, 2, 27, "CHILE", 8.8, 525.0, "Maule"),
    (2010, 4, 13, "CHINA", 6.9, 2_698.0, "Yushu"),
    (2011, 3, 11, "JAPAN", 9.1, 18_429.0, "Tohoku"),
    (2013, 4, 20, "CHINA", 6.6, 196.0, "Lushan"),
    (2014, 4, 1, "CHILE", 8.2, 6.0, "Iquique"),
    (2014, 8, 3, "CHINA", 6.2, 617.0, "Ludian"),
    (2015, 9, 16, "CHILE", 8.3, 13.0, "Illapel"),
    (2016, 4, 16, "JAPAN", 7.0, 50.0, "Kumamoto"),
    // Outside the plotted window.
    (1960, 5, 22, "CHILE", 9.5, 1_655.0, "Valdivia"),
];

fn catalog() -> ColumnTable {
    let dates = EVENTS
        .iter()
        .map(|&(y, m, d, ..)| days_from_civil(y, m, d) as f64)
        .collect();
    ColumnTable::new()
        .with_numeric("date", dates)
        .with_text("country", EVENTS.iter().map(|e| Some(e.3)))
        .with_numeric("eq_primary", EVENTS.iter().map(|e| e.4).collect())
        .with_numeric("deaths", EVENTS.iter().map(|e| e.5).collect())
        .with_text("location", EVENTS.iter().map(|e| Some(e.6)))
}

fn day(year: i64) -> f64 {
    days_from_civil(year, 1, 1) as f64
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mapping = Mapping::new()
        .x("date")
        .y("country")
        .size("eq_primary")
        .magnitude("eq_primary")
        .colour("deaths")
        .label("location");
    let points = geom_timeline(LayerOptions::default().with_style(StyleOverrides {
        alpha: Some(0.7),
        ..StyleOverrides::default()
    }));
    let labels = geom_timeline_label(LayerOptions::default().with_n_max(5));
    let chart = TimelineChartSpec::new(Arc::new(catalog()), mapping)
        .with_window(Some(day(2004)), Some(day(2017)))
        .with_baselines(StrokeStyle::solid(css::LIGHT_GRAY, 1.0))
        .with_layer(points)
        .with_layer(labels)
        .with_axis(TimeAxisSpec::new(3).with_tick_count(6).with_title("DATE"));

    let (mapper, batches) = chart.prepare()?;
    let ops = chart.render(&mapper, &batches)?;
    let stratum_names = mapper.strata().levels().enumerate().filter_map(|(i, level)| {
        let level = level?;
        let y = mapper.map(DataValue::Category(level), Axis::Y);
        Some(DrawOp::Text(TextOp {
            id: MarkId::for_row_part(4, i as u64, 0),
            anchor: Point::new(-0.01, y),
            text: level.into(),
            angle: 0.0,
            justify: TextAnchor::End,
            font_size: 11.0,
            color: css::BLACK,
            opacity: 1.0,
            check_overlap: false,
        }))
    });

    let mut scene = svg::SvgScene::new(
        Rect::new(0.0, 0.0, 900.0, 520.0),
        Rect::new(110.0, 120.0, 860.0, 440.0),
    );
    scene.extend(ops.iter().cloned());
    scene.extend(stratum_names);
    std::fs::write(OUTPUT, scene.to_svg_string())?;
    tracing::info!(ops = ops.len(), path = OUTPUT, "wrote timeline");
    Ok(())
}
