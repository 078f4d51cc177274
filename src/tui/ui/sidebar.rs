//! Input sidebar: one fixed-range widget per feature plus the Predict button.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{Category, FeatureRecord, Frequency, Gender, Transport, YesNo};
use crate::tui::styles::Theme;

/// Width of the slider track in cells.
const TRACK_WIDTH: usize = 14;

/// Fine-grained sliders move in hundredths.
const FINE_SCALE: i64 = 100;

/// Which feature a widget feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Gender,
    Age,
    Height,
    Weight,
    HistOverweight,
    Favc,
    Fcvc,
    Ncp,
    Caec,
    Smoke,
    Ch2o,
    Scc,
    Faf,
    Tue,
    Calc,
    Mtrans,
}

/// Widget state.
#[derive(Debug, Clone)]
pub enum Control {
    /// Choice among fixed options.
    Select {
        options: Vec<&'static str>,
        selected: usize,
        default: usize,
    },
    /// Bounded numeric value, stored in units of `1 / scale`.
    Slider {
        min: i64,
        max: i64,
        value: i64,
        default: i64,
        scale: i64,
    },
}

impl Control {
    fn number(&self) -> Option<f64> {
        match self {
            Self::Slider { value, scale, .. } => Some(*value as f64 / *scale as f64),
            Self::Select { .. } => None,
        }
    }

    fn choice_index(&self) -> Option<usize> {
        match self {
            Self::Select { selected, .. } => Some(*selected),
            Self::Slider { .. } => None,
        }
    }

    /// Move by `steps`: sliders clamp at their bounds, selects wrap around.
    fn adjust(&mut self, steps: i64) {
        match self {
            Self::Slider {
                min, max, value, ..
            } => {
                *value = (*value + steps).clamp(*min, *max);
            }
            Self::Select {
                options, selected, ..
            } => {
                let n = options.len() as i64;
                if n > 0 {
                    *selected = (*selected as i64 + steps).rem_euclid(n) as usize;
                }
            }
        }
    }

    fn set_to_bound(&mut self, upper: bool) {
        match self {
            Self::Slider {
                min, max, value, ..
            } => *value = if upper { *max } else { *min },
            Self::Select {
                options, selected, ..
            } => *selected = if upper { options.len().saturating_sub(1) } else { 0 },
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Slider { value, default, .. } => *value = *default,
            Self::Select {
                selected, default, ..
            } => *selected = *default,
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Select {
                options, selected, ..
            } => format!("◀ {} ▶", options.get(*selected).copied().unwrap_or("")),
            Self::Slider {
                min,
                max,
                value,
                scale,
                ..
            } => {
                let span = (max - min).max(1) as f64;
                let filled = (((value - min) as f64 / span) * TRACK_WIDTH as f64).round() as usize;
                let filled = filled.min(TRACK_WIDTH);
                let decimals: usize = if *scale == 1 { 0 } else { 2 };
                format!(
                    "{}{} {:.*}",
                    "━".repeat(filled),
                    "─".repeat(TRACK_WIDTH - filled),
                    decimals,
                    *value as f64 / *scale as f64
                )
            }
        }
    }
}

/// Labelled input widget.
#[derive(Debug, Clone)]
pub struct InputField {
    pub id: FieldId,
    pub label: &'static str,
    pub control: Control,
}

impl InputField {
    fn select<C: Category>(id: FieldId, label: &'static str, default: C) -> Self {
        let options = C::ALL.iter().map(|c| c.label()).collect();
        Self {
            id,
            label,
            control: Control::Select {
                options,
                selected: default.index(),
                default: default.index(),
            },
        }
    }

    fn int_slider(id: FieldId, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            id,
            label,
            control: Control::Slider {
                min,
                max,
                value: default,
                default,
                scale: 1,
            },
        }
    }

    fn fine_slider(id: FieldId, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        let units = |v: f64| (v * FINE_SCALE as f64).round() as i64;
        Self {
            id,
            label,
            control: Control::Slider {
                min: units(min),
                max: units(max),
                value: units(default),
                default: units(default),
                scale: FINE_SCALE,
            },
        }
    }
}

/// Sidebar state
pub struct SidebarState {
    pub fields: Vec<InputField>,
    /// Focused row; `fields.len()` is the Predict button.
    pub selected_field: usize,
}

impl Default for SidebarState {
    fn default() -> Self {
        let d = FeatureRecord::default();
        Self {
            fields: vec![
                InputField::select(FieldId::Gender, "Gender", d.gender),
                InputField::int_slider(FieldId::Age, "Age", 14, 35, 23),
                InputField::int_slider(FieldId::Height, "Height (cm)", 40, 200, 160),
                InputField::int_slider(FieldId::Weight, "Weight (kg)", 30, 150, 70),
                InputField::select(
                    FieldId::HistOverweight,
                    "Family History of Overweight",
                    d.hist_overweight,
                ),
                InputField::select(
                    FieldId::Favc,
                    "Frequency of Consuming High Caloric Food",
                    d.favc,
                ),
                InputField::int_slider(
                    FieldId::Fcvc,
                    "Frequency of Consumption of Vegetables and Fruits",
                    1,
                    3,
                    2,
                ),
                InputField::int_slider(
                    FieldId::Ncp,
                    "Number of Main Courses Consumed in a Day",
                    1,
                    4,
                    2,
                ),
                InputField::select(FieldId::Caec, "Consumption of Food Between Meals", d.caec),
                InputField::select(FieldId::Smoke, "Smoking Habit", d.smoke),
                InputField::fine_slider(
                    FieldId::Ch2o,
                    "Calories Consumed from Soft Drinks",
                    1.0,
                    5.0,
                    2.0,
                ),
                InputField::select(FieldId::Scc, "Consumption of Sweetened Foods", d.scc),
                InputField::fine_slider(FieldId::Faf, "Physical Activity Frequency", 0.0, 3.0, 1.0),
                InputField::int_slider(
                    FieldId::Tue,
                    "Time Spent in Physical Activity (minutes per week)",
                    0,
                    180,
                    60,
                ),
                InputField::select(FieldId::Calc, "Consumption of Alcohol", d.calc),
                InputField::select(FieldId::Mtrans, "Transportation to Work", d.mtrans),
            ],
            selected_field: 0,
        }
    }
}

impl SidebarState {
    /// Number of focusable rows, including the Predict button.
    fn row_count(&self) -> usize {
        self.fields.len() + 1
    }

    /// Whether the Predict button has focus.
    #[must_use]
    pub fn on_predict_button(&self) -> bool {
        self.selected_field == self.fields.len()
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.row_count();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.row_count() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Adjust the focused widget. Returns `true` if a value changed.
    pub fn adjust(&mut self, steps: i64) -> bool {
        self.update_focused(|c| c.adjust(steps))
    }

    /// Jump the focused widget to its lower or upper bound.
    pub fn set_to_bound(&mut self, upper: bool) -> bool {
        self.update_focused(|c| c.set_to_bound(upper))
    }

    fn update_focused(&mut self, f: impl FnOnce(&mut Control)) -> bool {
        let Some(field) = self.fields.get_mut(self.selected_field) else {
            return false;
        };
        let before = field.control.display();
        f(&mut field.control);
        before != field.control.display()
    }

    /// Restore every widget to its default.
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.control.reset();
        }
        self.selected_field = 0;
    }

    fn field(&self, id: FieldId) -> Option<&InputField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn number(&self, id: FieldId) -> Option<f64> {
        self.field(id).and_then(|f| f.control.number())
    }

    fn choice<C: Category>(&self, id: FieldId) -> Option<C> {
        self.field(id)
            .and_then(|f| f.control.choice_index())
            .map(C::from_index)
    }

    /// Build the record from the current widget values.
    #[must_use]
    pub fn to_feature_record(&self) -> FeatureRecord {
        let d = FeatureRecord::default();
        FeatureRecord {
            gender: self.choice::<Gender>(FieldId::Gender).unwrap_or(d.gender),
            age: self.number(FieldId::Age).unwrap_or(d.age),
            height: self.number(FieldId::Height).unwrap_or(d.height),
            weight: self.number(FieldId::Weight).unwrap_or(d.weight),
            hist_overweight: self
                .choice::<YesNo>(FieldId::HistOverweight)
                .unwrap_or(d.hist_overweight),
            favc: self.choice::<YesNo>(FieldId::Favc).unwrap_or(d.favc),
            fcvc: self.number(FieldId::Fcvc).unwrap_or(d.fcvc),
            ncp: self.number(FieldId::Ncp).unwrap_or(d.ncp),
            caec: self.choice::<Frequency>(FieldId::Caec).unwrap_or(d.caec),
            smoke: self.choice::<YesNo>(FieldId::Smoke).unwrap_or(d.smoke),
            ch2o: self.number(FieldId::Ch2o).unwrap_or(d.ch2o),
            scc: self.choice::<Frequency>(FieldId::Scc).unwrap_or(d.scc),
            faf: self.number(FieldId::Faf).unwrap_or(d.faf),
            tue: self.number(FieldId::Tue).unwrap_or(d.tue),
            calc: self.choice::<YesNo>(FieldId::Calc).unwrap_or(d.calc),
            mtrans: self.choice::<Transport>(FieldId::Mtrans).unwrap_or(d.mtrans),
        }
    }
}

/// Render the input sidebar
pub fn render_sidebar(f: &mut Frame, area: Rect, state: &SidebarState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Widgets
            Constraint::Length(4), // Key hints
        ])
        .split(area);

    render_fields(f, chunks[0], state);
    render_key_hints(f, chunks[1]);
}

fn render_fields(f: &mut Frame, area: Rect, state: &SidebarState) {
    let mut items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == state.selected_field;
            let label_style = if is_selected {
                Theme::focused()
            } else {
                Theme::text_secondary()
            };
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(format!(" {}", field.label), label_style)),
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(field.control.display(), Theme::text()),
                ]),
            ]))
        })
        .collect();

    let button_style = if state.on_predict_button() {
        Theme::button_focused()
    } else {
        Theme::button()
    };
    items.push(ListItem::new(Text::from(vec![
        Line::from(""),
        Line::from(Span::styled("  [ Predict ]  ", button_style)),
    ])));

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Input Features ", Theme::focused()))
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        )
        .highlight_symbol("▌");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_field));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::focused()),
            Span::styled("Field ", Theme::text_secondary()),
            Span::styled("[←→] ", Theme::focused()),
            Span::styled("Adjust ", Theme::text_secondary()),
            Span::styled("[PgUp/PgDn] ", Theme::focused()),
            Span::styled("×10", Theme::text_secondary()),
        ]),
        Line::from(vec![
            Span::styled("[Enter] ", Theme::focused()),
            Span::styled("Predict ", Theme::text_secondary()),
            Span::styled("[R] ", Theme::focused()),
            Span::styled("Reset ", Theme::text_secondary()),
            Span::styled("[Q] ", Theme::focused()),
            Span::styled("Quit", Theme::text_secondary()),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(hints, area);
}
