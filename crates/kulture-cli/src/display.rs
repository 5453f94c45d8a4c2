//! Human-readable rendering of session screens

use console::style;
use kulture_core::guide::ResponsibleTourismGuide;
use kulture_core::models::{Category, CategoryWarning, CulturalRecord};
use kulture_core::session::{DetailView, HomeView, MapView, Notice, NoticeLevel};
use kulture_core::ScreenView;

use crate::output::OutputWriter;
use crate::output_types::{format_coordinate, EventRow, MarkerRow, RecordRow, RegionRow};

pub fn screen(output: &OutputWriter, view: &ScreenView) {
    match view {
        ScreenView::Home(home) => self::home(output, home),
        ScreenView::Map(map) => self::map(output, map),
        ScreenView::Detail(detail) => self::detail(output, detail, None),
        ScreenView::Guide(guide) => self::guide(output, guide),
    }
}

pub fn home(output: &OutputWriter, home: &HomeView) {
    output.section("MapMy Kulture");
    notices(output, &home.notices);

    output.table(home.regions.iter().map(RegionRow::from).collect());

    if let Some(range) = home.date_range {
        output.section(format!("Festivals from {}", range));
        if home.events.is_empty() {
            output.info("No festivals in this period");
        } else {
            output.table(home.events.iter().map(EventRow::from).collect());
        }
    }
}

pub fn map(output: &OutputWriter, map: &MapView) {
    output.section(format!("{} on the map", map.region.name));
    category_warnings(output, &map.warnings);

    output.kv("Centre", map.center);

    if map.markers.is_empty() {
        output.info("No sites with coordinates; showing the state's location");
        return;
    }

    let rows: Vec<MarkerRow> = map
        .markers
        .iter()
        .map(|marker| MarkerRow {
            category: marker.category,
            title: marker.title.clone(),
            coordinate: marker.coordinate,
        })
        .collect();
    output.table(rows);
}

/// Render the detail screen, optionally restricted to one category
pub fn detail(output: &OutputWriter, detail: &DetailView, only: Option<Category>) {
    output.section(format!("Explore {}", detail.region.name));
    category_warnings(output, &detail.warnings);

    for (category, records) in detail.bundle.categories() {
        if only.is_some_and(|wanted| wanted != category) {
            continue;
        }

        output.section(category.label());
        if records.is_empty() {
            println!("  {}", style(empty_message(category)).dim());
        } else {
            output.table(records.iter().map(record_row).collect());
        }
    }
}

pub fn guide(output: &OutputWriter, guide: &ResponsibleTourismGuide) {
    output.section(guide.title);
    println!("{}", guide.introduction);

    for section in guide.sections {
        println!("\n{}", style(section.title).bold());
        for tip in section.tips {
            println!("  • {}: {}", style(tip.heading).cyan(), tip.text);
        }
    }

    println!("\n{}", style(guide.closing_note).italic());
}

pub fn notices(output: &OutputWriter, notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => output.info(&notice.message),
            NoticeLevel::Warning | NoticeLevel::Error => output.warning(&notice.message),
        }
    }
}

fn category_warnings(output: &OutputWriter, warnings: &[CategoryWarning]) {
    for warning in warnings {
        output.warning(&warning.message);
    }
}

fn record_row(record: &CulturalRecord) -> RecordRow {
    let location = match (record.coordinate, record.date) {
        (_, Some(date)) => format!("{} ({})", format_coordinate(record.coordinate), date),
        (coordinate, None) => format_coordinate(coordinate),
    };

    RecordRow {
        title: record.title.clone(),
        description: record.description.clone(),
        location,
    }
}

fn empty_message(category: Category) -> String {
    format!("No {} listed for this state", category.label().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kulture_core::models::Coordinate;

    #[test]
    fn test_record_row_location() {
        let record = CulturalRecord::new(Category::Festival, "Onam", "Harvest")
            .with_coordinate(Coordinate::new(9.4981, 76.3388).unwrap())
            .with_date(NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());

        let row = record_row(&record);
        assert_eq!(row.location, "9.4981, 76.3388 (2025-09-05)");

        let food = CulturalRecord::new(Category::Food, "Sadya", "Banquet");
        assert_eq!(record_row(&food).location, "-");
    }

    #[test]
    fn test_empty_message_uses_label() {
        assert_eq!(
            empty_message(Category::Scheme),
            "No government schemes listed for this state"
        );
    }
}
