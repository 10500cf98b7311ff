//! Candlestick scene layout and the drawing-surface seam.

use serde::{Deserialize, Serialize};

use crate::{OhlcBar, ValidationError};

/// Fill color for candles that closed at or above their open.
pub const BULLISH_COLOR: &str = "#26a69a";
/// Fill color for candles that closed below their open.
pub const BEARISH_COLOR: &str = "#ef5350";

const SLOT_PADDING_RATIO: f64 = 0.1;
const BODY_WIDTH_RATIO: f64 = 0.8;
const MIN_BODY_HEIGHT: f64 = 1.0;

/// Pixel dimensions of the target drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
}

impl ChartArea {
    pub fn new(width: f64, height: f64) -> Result<Self, ValidationError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ValidationError::InvalidChartDimension { dimension: "width" });
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ValidationError::InvalidChartDimension {
                dimension: "height",
            });
        }
        Ok(Self { width, height })
    }
}

/// Candle direction, decided by `close >= open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub const fn color(self) -> &'static str {
        match self {
            Self::Bullish => BULLISH_COLOR,
            Self::Bearish => BEARISH_COLOR,
        }
    }
}

/// Precomputed pixel geometry for one candle: a wick line and a body rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGlyph {
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_left: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub direction: Direction,
}

/// Laid-out candlestick scene for a fixed surface size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub area: ChartArea,
    pub price_min: f64,
    pub price_max: f64,
    pub candles: Vec<CandleGlyph>,
}

/// Map OHLC bars onto candle glyphs with one linear price scale shared by
/// every bar.
///
/// The surface width is split into `bars.len()` equal slots; each candle gets
/// 10% padding per side and an 80%-wide body. Price `min` maps to the bottom
/// pixel row and `max` to the top. When every price in the series is equal
/// the scale is degenerate, and all geometry collapses to flat bodies at
/// vertical mid-surface.
pub fn layout_candles(bars: &[OhlcBar], area: ChartArea) -> Result<ChartScene, ValidationError> {
    if bars.is_empty() {
        return Err(ValidationError::EmptyBarSeries);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for bar in bars {
        for price in [bar.open, bar.high, bar.low, bar.close] {
            min = min.min(price);
            max = max.max(price);
        }
    }

    let map_y = |price: f64| -> f64 {
        if max == min {
            area.height / 2.0
        } else {
            area.height - (price - min) / (max - min) * area.height
        }
    };

    let slot_width = area.width / bars.len() as f64;
    let body_width = slot_width * BODY_WIDTH_RATIO;

    let mut candles = Vec::with_capacity(bars.len());
    for (index, bar) in bars.iter().enumerate() {
        let slot_left = slot_width * index as f64;
        let y_open = map_y(bar.open);
        let y_close = map_y(bar.close);

        let direction = if bar.close >= bar.open {
            Direction::Bullish
        } else {
            Direction::Bearish
        };

        candles.push(CandleGlyph {
            wick_x: slot_left + slot_width / 2.0,
            wick_top: map_y(bar.high),
            wick_bottom: map_y(bar.low),
            body_left: slot_left + slot_width * SLOT_PADDING_RATIO,
            body_width,
            body_top: y_open.min(y_close),
            body_height: (y_open - y_close).abs().max(MIN_BODY_HEIGHT),
            direction,
        });
    }

    Ok(ChartScene {
        area,
        price_min: min,
        price_max: max,
        candles,
    })
}

/// Mutable drawing target for a laid-out scene.
pub trait DrawSurface {
    fn clear(&mut self, area: ChartArea);
    fn stroke_vline(&mut self, x: f64, y_from: f64, y_to: f64, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
}

/// Lay out `bars` and paint them onto `surface`: clear first, then wick and
/// body per candle in series order.
pub fn draw_candles(
    surface: &mut dyn DrawSurface,
    bars: &[OhlcBar],
    area: ChartArea,
) -> Result<ChartScene, ValidationError> {
    let scene = layout_candles(bars, area)?;

    surface.clear(area);
    for glyph in &scene.candles {
        let color = glyph.direction.color();
        surface.stroke_vline(glyph.wick_x, glyph.wick_top, glyph.wick_bottom, color);
        surface.fill_rect(
            glyph.body_left,
            glyph.body_top,
            glyph.body_width,
            glyph.body_height,
            color,
        );
    }

    Ok(scene)
}
