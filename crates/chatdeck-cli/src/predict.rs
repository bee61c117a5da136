use std::path::Path;

use anyhow::{bail, Context, Result};
use chatdeck_core::{
    constants::classifier::NUM_FEATURES, predict_species, Classifier, FeatureSpec, LinearModel,
    Species,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::theme::Theme;
use crate::tui;

// ── Single-shot mode ────────────────────────────────────────────────────

/// Parse `a,b,c,d` into the four measurements, checking each slider's range.
pub fn parse_features(input: &str) -> Result<[f32; NUM_FEATURES]> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != NUM_FEATURES {
        bail!("expected {NUM_FEATURES} comma-separated values, got {}", parts.len());
    }

    let mut values = [0.0; NUM_FEATURES];
    for ((slot, raw), spec) in values.iter_mut().zip(&parts).zip(FeatureSpec::IRIS.iter()) {
        let value: f32 = raw
            .parse()
            .with_context(|| format!("{}: '{raw}' is not a number", spec.label))?;
        if !(spec.min..=spec.max).contains(&value) {
            bail!(
                "{} must be between {:.1} and {:.1}, got {value}",
                spec.label,
                spec.min,
                spec.max
            );
        }
        *slot = value;
    }
    Ok(values)
}

pub fn load_model(path: &Path) -> Result<LinearModel> {
    LinearModel::load(path).with_context(|| format!("loading model from {}", path.display()))
}

pub fn run_single(model_path: &Path, features: &str) -> Result<()> {
    let model = load_model(model_path)?;
    let values = parse_features(features)?;
    let species = predict_species(&model, &values)?;
    println!("The predicted species is: {species}");
    Ok(())
}

// ── Slider form ─────────────────────────────────────────────────────────

/// The four sliders, the focused one, and the last prediction.
#[derive(Debug, Clone)]
pub struct PredictForm {
    values: [f32; NUM_FEATURES],
    selected: usize,
    result: Option<Result<Species, String>>,
}

impl Default for PredictForm {
    fn default() -> Self {
        Self {
            values: FeatureSpec::initial_values(),
            selected: 0,
            result: None,
        }
    }
}

impl PredictForm {
    pub fn values(&self) -> &[f32; NUM_FEATURES] {
        &self.values
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn result(&self) -> Option<&Result<Species, String>> {
        self.result.as_ref()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % NUM_FEATURES;
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + NUM_FEATURES - 1) % NUM_FEATURES;
    }

    /// Move the focused slider by `steps` increments (negative moves down).
    pub fn nudge(&mut self, steps: i32) {
        let spec = FeatureSpec::IRIS[self.selected];
        let mut value = self.values[self.selected];
        for _ in 0..steps.unsigned_abs() {
            value = if steps > 0 { spec.step_up(value) } else { spec.step_down(value) };
        }
        self.values[self.selected] = value;
    }

    /// The "Predict" button. Errors are kept for display.
    pub fn predict(&mut self, classifier: &dyn Classifier) -> Option<&Result<Species, String>> {
        let outcome = predict_species(classifier, &self.values).map_err(|e| e.to_string());
        self.result = Some(outcome);
        self.result.as_ref()
    }
}

// ── Interactive TUI ─────────────────────────────────────────────────────

pub async fn run_tui(model_path: &Path, theme: Theme) -> Result<()> {
    let model = load_model(model_path)?;
    let mut form = PredictForm::default();

    let mut terminal = tui::enter(false)?;
    let outcome: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| draw_ui(f, &form, &theme)) {
            break Err(e.into());
        }

        match event::poll(tui::FRAME) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        let coarse = if key.modifiers.contains(KeyModifiers::SHIFT) { 10 } else { 1 };
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc | KeyCode::Char('q')) => {
                break Ok(())
            }
            (_, KeyCode::Up | KeyCode::BackTab) => form.select_prev(),
            (_, KeyCode::Down | KeyCode::Tab) => form.select_next(),
            (_, KeyCode::Left | KeyCode::Char('h')) => form.nudge(-coarse),
            (_, KeyCode::Right | KeyCode::Char('l')) => form.nudge(coarse),
            (_, KeyCode::Enter | KeyCode::Char('p')) => {
                form.predict(&model);
            }
            _ => {}
        }
    };

    tui::leave(&mut terminal, false)?;
    outcome
}

fn draw_ui(f: &mut ratatui::Frame, form: &PredictForm, theme: &Theme) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(std::iter::repeat(Constraint::Length(3)).take(NUM_FEATURES));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "🌸 Iris Flower Predictor",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Predict the species of an iris flower from its measurements.",
            Style::default().fg(theme.muted),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    for (i, spec) in FeatureSpec::IRIS.iter().enumerate() {
        draw_slider(f, chunks[1 + i], spec, form.values[i], i == form.selected, theme);
    }

    draw_result(f, chunks[1 + NUM_FEATURES], form.result(), theme);

    let help = Span::styled(
        " ↑/↓ select  ←/→ adjust (Shift ×10)  Enter predict  q quit ",
        Style::default().fg(theme.muted),
    );
    f.render_widget(Paragraph::new(Line::from(help)), chunks[chunks.len() - 1]);
}

fn draw_slider(
    f: &mut ratatui::Frame,
    area: Rect,
    spec: &FeatureSpec,
    value: f32,
    focused: bool,
    theme: &Theme,
) {
    let ratio = ((value - spec.min) / (spec.max - spec.min)).clamp(0.0, 1.0) as f64;
    let border = if focused { theme.accent } else { theme.border };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({:.1}-{:.1}) ", spec.label, spec.min, spec.max))
                .border_style(Style::default().fg(border)),
        )
        .gauge_style(Style::default().fg(if focused { theme.accent } else { theme.muted }))
        .ratio(ratio)
        .label(format!("{value:.1}"));
    f.render_widget(gauge, area);
}

fn draw_result(
    f: &mut ratatui::Frame,
    area: Rect,
    result: Option<&Result<Species, String>>,
    theme: &Theme,
) {
    let line = match result {
        None => Line::from(Span::styled("[ Predict ]  press Enter", Style::default().fg(theme.muted))),
        Some(Ok(species)) => Line::from(Span::styled(
            format!("The predicted species is: {species}"),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Some(Err(e)) => Line::from(Span::styled(format!("Error: {e}"), Style::default().fg(theme.error))),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(line).block(block), area);
}
