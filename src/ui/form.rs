use eframe::egui::{self, Button, DragValue, RichText, Ui};

use crate::config::{FormLimits, NumberField, WINDOW_TITLE};
use crate::data::model::{Category, CategoryOption, HouseInputs};
use crate::state::{AppState, FormEvents};

// ---------------------------------------------------------------------------
// House form (central panel)
// ---------------------------------------------------------------------------

/// Render the input form and the output line. Returns what the user did
/// this frame; the caller decides what to recompute.
pub fn house_form(ui: &mut Ui, state: &mut AppState) -> FormEvents {
    let mut events = FormEvents::default();

    ui.heading(RichText::new(WINDOW_TITLE).strong());
    ui.add_space(8.0);

    {
        // Split borrows: dropdown choices are read while inputs are edited.
        let AppState {
            inputs, options, ..
        } = &mut *state;
        let options = &*options;
        let opts = |c: Category| options.for_category(c);

        ui.columns(2, |cols| {
            events.changed |= category_select(
                &mut cols[0],
                inputs,
                Category::Location,
                opts(Category::Location),
            );
            events.changed |= category_select(
                &mut cols[1],
                inputs,
                Category::PropertyType,
                opts(Category::PropertyType),
            );
        });
        ui.add_space(6.0);

        ui.columns(3, |cols| {
            events.changed |= stepper(&mut cols[0], &mut inputs.rooms, FormLimits::ROOMS);
            events.changed |= stepper(&mut cols[1], &mut inputs.bathrooms, FormLimits::BATHROOMS);
            events.changed |= stepper(&mut cols[2], &mut inputs.car_parks, FormLimits::CAR_PARKS);
        });
        ui.add_space(6.0);

        ui.columns(2, |cols| {
            events.changed |= number_input(&mut cols[0], &mut inputs.size, FormLimits::SIZE);
            events.changed |= category_select(
                &mut cols[1],
                inputs,
                Category::Furnishing,
                opts(Category::Furnishing),
            );
        });
    }

    ui.separator();

    events.calculate = ui.add(Button::new("Calculate")).clicked();

    if let Some(line) = state.output_line() {
        ui.add_space(6.0);
        ui.label(RichText::new(line).size(18.0).strong());
    }

    events
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Single-select dropdown over a closed set of options.
fn category_select(
    ui: &mut Ui,
    inputs: &mut HouseInputs,
    category: Category,
    options: &[CategoryOption],
) -> bool {
    ui.label(category.label());

    let selection = inputs.selection_mut(category);
    let current = selection
        .as_ref()
        .map(|o| o.to_string())
        .unwrap_or_default();
    let mut changed = false;

    egui::ComboBox::from_id_salt(category.prefix())
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                let is_selected = selection.as_ref() == Some(opt);
                if ui.selectable_label(is_selected, &opt.suffix).clicked() && !is_selected {
                    *selection = Some(opt.clone());
                    changed = true;
                }
            }
        });
    changed
}

/// Integer field with -/+ buttons.
fn stepper(ui: &mut Ui, value: &mut u32, field: NumberField) -> bool {
    ui.label(field.label);
    let before = *value;
    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(*value > field.min, Button::new("−")).clicked() {
            *value = field.clamp(value.saturating_sub(field.step));
        }
        ui.add(
            DragValue::new(&mut *value)
                .range(field.min..=field.max)
                .speed(field.step as f64),
        );
        if ui.add_enabled(*value < field.max, Button::new("+")).clicked() {
            *value = field.clamp(value.saturating_add(field.step));
        }
    });
    *value != before
}

/// Integer field without buttons, for wide ranges.
fn number_input(ui: &mut Ui, value: &mut u32, field: NumberField) -> bool {
    ui.label(field.label);
    let before = *value;
    ui.add(
        DragValue::new(&mut *value)
            .range(field.min..=field.max)
            .speed(field.step as f64),
    );
    *value != before
}
