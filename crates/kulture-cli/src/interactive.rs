use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use kulture_core::models::Region;
use kulture_core::{NavigationState, Screen};

/// Menu entries offered on each screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PickState,
    SetDates,
    ClearDates,
    Guide,
    ExploreDetails,
    Back,
    BackToMap,
    BackToHome,
    Quit,
}

impl MenuChoice {
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::PickState => "Show a state on the map",
            MenuChoice::SetDates => "Find festivals between dates",
            MenuChoice::ClearDates => "Clear dates",
            MenuChoice::Guide => "Responsible tourism guide",
            MenuChoice::ExploreDetails => "Explore details",
            MenuChoice::Back => "Back",
            MenuChoice::BackToMap => "Back to map",
            MenuChoice::BackToHome => "Back to home",
            MenuChoice::Quit => "Quit",
        }
    }
}

/// Choices valid for the current screen
pub fn available_choices(state: &NavigationState) -> Vec<MenuChoice> {
    let mut choices = match state.screen() {
        Screen::Home => {
            let mut home = vec![MenuChoice::PickState, MenuChoice::SetDates];
            if state.date_range().is_some() {
                home.push(MenuChoice::ClearDates);
            }
            home.push(MenuChoice::Guide);
            home
        }
        Screen::Map => vec![MenuChoice::ExploreDetails, MenuChoice::Back],
        Screen::Detail => vec![MenuChoice::BackToMap, MenuChoice::BackToHome],
        Screen::Guide => vec![MenuChoice::Back],
    };
    choices.push(MenuChoice::Quit);
    choices
}

pub fn prompt_choice(choices: &[MenuChoice]) -> Result<MenuChoice> {
    let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
    let index = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices[index])
}

/// Pick a state from the list, or type a name when the list is empty
pub fn prompt_state(regions: &[Region]) -> Result<String> {
    if regions.is_empty() {
        let name: String = Input::new().with_prompt("State name").interact_text()?;
        return Ok(name);
    }

    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    let index = Select::new()
        .with_prompt("Choose a state")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[index].to_string())
}

pub fn prompt_dates() -> Result<(NaiveDate, NaiveDate)> {
    let start = prompt_date("Start date (YYYY-MM-DD)")?;
    let end = prompt_date("End date (YYYY-MM-DD)")?;
    Ok((start, end))
}

fn prompt_date(prompt: &str) -> Result<NaiveDate> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_date(&text)?)
}

fn parse_date(input: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}
