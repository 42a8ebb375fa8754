//! Interactive forecast view: a city prompt with suggestions, then cards.

use std::{cell::RefCell, rc::Rc};

use forecast_core::{CityDirectory, ForecastSource, ViewState};
use inquire::{
    Autocomplete, CustomUserError, InquireError, Text, autocompletion::Replacement,
};

use crate::render;

/// Feeds every keystroke through the view state and offers its suggestions.
#[derive(Clone)]
struct CityCompleter {
    state: Rc<RefCell<ViewState>>,
    directory: Rc<CityDirectory>,
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let mut state = self.state.borrow_mut();
        state.input(input, &self.directory);
        Ok(state.suggestions().to_vec())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

enum Submitted {
    City(String),
    Clear,
    Quit,
}

fn prompt_city(completer: &CityCompleter) -> anyhow::Result<Submitted> {
    let initial = completer.state.borrow().query().to_string();

    let answer = Text::new("City:")
        .with_placeholder("Enter city name")
        .with_initial_value(&initial)
        .with_autocomplete(completer.clone())
        .with_help_message("↑↓ pick a suggestion, Enter to get weather, Esc to clear, Ctrl-C to quit")
        .prompt();

    match answer {
        Ok(city) => Ok(Submitted::City(city)),
        Err(InquireError::OperationCanceled) if !completer.state.borrow().query().is_empty() => {
            Ok(Submitted::Clear)
        }
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(Submitted::Quit)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run(source: &dyn ForecastSource, directory: CityDirectory) -> anyhow::Result<()> {
    let state = Rc::new(RefCell::new(ViewState::new()));
    let completer = CityCompleter { state: Rc::clone(&state), directory: Rc::new(directory) };

    loop {
        let city = match prompt_city(&completer)? {
            Submitted::City(city) => city,
            Submitted::Clear => {
                state.borrow_mut().clear();
                continue;
            }
            Submitted::Quit => break,
        };

        let begun = {
            let mut state = state.borrow_mut();
            let city = state.submitted_city(&city, &completer.directory);
            state.begin_fetch(&city)
        };
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(e) => {
                println!("{}", render::alert(&e.to_string()));
                continue;
            }
        };

        let result = source.fetch_forecast(ticket.city()).await;
        state.borrow_mut().complete_fetch(ticket, result);

        let out = render::view(&state.borrow());
        if !out.is_empty() {
            println!("\n{out}");
        }
    }

    Ok(())
}
