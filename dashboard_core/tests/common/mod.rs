#![allow(dead_code)]

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use dashboard_core::{
    ChartKey, Color,
    chart::{ChartStyle, Dataset, FillStyle, LabelBox, Point, Rect, RenderSurface, SurfaceProvider},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Draw {
        key: ChartKey,
        color: Color,
        values: Vec<f64>,
        fill: FillStyle,
    },
    Label {
        key: ChartKey,
        label: LabelBox,
    },
    Released(ChartKey),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// Surface that plots samples on a fixed grid and records every call.
pub struct RecordingSurface {
    key: ChartKey,
    area: Option<Rect>,
    log: Log,
}

impl RenderSurface for RecordingSurface {
    fn chart_area(&self) -> Option<Rect> {
        self.area
    }

    fn draw_series(
        &mut self,
        dataset: &Dataset,
        _style: &ChartStyle,
        fill: &FillStyle,
    ) -> Vec<Option<Point>> {
        self.log.borrow_mut().push(Event::Draw {
            key: self.key,
            color: dataset.color,
            values: dataset.values.clone(),
            fill: *fill,
        });
        let Some(area) = self.area else {
            return vec![None; dataset.values.len()];
        };
        dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| v.is_finite().then(|| Point::new(area.left + i as f64 * 10.0, area.top + 5.0)))
            .collect()
    }

    fn text_width(&self, text: &str) -> f64 {
        text.len() as f64 * 6.0
    }

    fn draw_label(&mut self, label: &LabelBox) {
        self.log.borrow_mut().push(Event::Label {
            key: self.key,
            label: label.clone(),
        });
    }

    fn release(&mut self) {
        self.log.borrow_mut().push(Event::Released(self.key));
    }
}

/// Hands out recording surfaces for a configurable set of keys.
pub struct RecordingProvider {
    pub available: HashSet<ChartKey>,
    pub area: Option<Rect>,
    pub log: Log,
    pub handed_out: Vec<ChartKey>,
    pub presented: Vec<ChartKey>,
}

impl RecordingProvider {
    pub fn all() -> Self {
        Self::only(&ChartKey::ALL)
    }

    pub fn only(keys: &[ChartKey]) -> Self {
        Self {
            available: keys.iter().copied().collect(),
            area: Some(Rect::new(0.0, 0.0, 200.0, 100.0)),
            log: Rc::default(),
            handed_out: Vec::new(),
            presented: Vec::new(),
        }
    }

    pub fn r#unsized(mut self) -> Self {
        self.area = None;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn labels_for(&self, key: ChartKey) -> Vec<LabelBox> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Label { key: k, label } if *k == key => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> Vec<ChartKey> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Released(k) => Some(*k),
                _ => None,
            })
            .collect()
    }
}

impl SurfaceProvider for RecordingProvider {
    type Surface = RecordingSurface;

    fn surface_for(&mut self, key: ChartKey) -> Option<RecordingSurface> {
        if !self.available.contains(&key) {
            return None;
        }
        self.handed_out.push(key);
        Some(RecordingSurface {
            key,
            area: self.area,
            log: Rc::clone(&self.log),
        })
    }

    fn present(&mut self, key: ChartKey, _surface: &RecordingSurface) {
        self.presented.push(key);
    }
}

pub fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|d| format!("{d:02} Eki")).collect()
}

pub const METRICS_JSON: &str = r#"{
    "local": {
        "garanti": {"alis": 2950.5, "satis": 3080.0},
        "piyasa": {"alis": 3000.0, "satis": 3010.25},
        "status": "live"
    },
    "global": {
        "ONS": {"price": 2650.4, "change": 0.5},
        "USDTRY": {"price": 34.21, "change": 0.6},
        "US10Y": {"price": 4.41, "change": 0.1},
        "history": {
            "dates": ["01 Eki", "02 Eki", "03 Eki", "04 Eki"],
            "ons_prices": [2600.0, 2640.0, 2610.0, 2650.4],
            "usd_prices": [34.3, 34.2, 34.25, 34.21],
            "us10y_prices": [4.41, 4.5, 4.38, 4.41],
            "gram_prices": [2890.0, 2920.5, 2901.0, 3010.25],
            "arbitrage_prices": [],
            "arbitrage_dates": []
        }
    },
    "analysis": {"spread_tl": 129.5, "spread_pct": 1.0, "signal": "AL"}
}"#;
