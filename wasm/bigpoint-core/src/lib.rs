use js_sys::Function;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

pub mod deck;
pub mod errors;
pub mod game;
pub mod rules;
pub mod sim;
pub mod strategy;

#[derive(Debug, Default, Deserialize)]
struct SessionInput {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    rules: Option<rules::RulesInput>,
}

fn session_input(params: &JsValue) -> Result<SessionInput, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(SessionInput::default());
    }
    serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))
}

/// One game at the table, driven by the page.
#[wasm_bindgen]
pub struct WarSession {
    game: game::WarGame,
}

#[wasm_bindgen]
impl WarSession {
    #[wasm_bindgen(constructor)]
    pub fn new(params: &JsValue) -> Result<WarSession, JsValue> {
        console_error_panic_hook::set_once();
        let input = session_input(params)?;
        let game_rules = rules::to_game_rules(&input.rules.unwrap_or_default())
            .map_err(|err| JsValue::from_str(&format!("Rules error: {err}")))?;
        let deck = deck::Deck::with_seed(input.seed);
        Ok(WarSession {
            game: game::WarGame::new(game_rules, deck),
        })
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn play_round(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let report = self.game.play_round(index).map_err(|err| {
            let message = format!("Invalid move: {err}");
            web_sys::console::warn_1(&JsValue::from_str(&message));
            JsValue::from_str(&message)
        })?;

        serde_wasm_bindgen::to_value(&report)
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.game.table_view())
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }

    pub fn banner(&self) -> Option<String> {
        self.game.banner()
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }
}

#[wasm_bindgen]
pub fn create_deck() -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    serde_wasm_bindgen::to_value(&deck::create_deck())
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn shuffled_deck(seed: Option<u64>) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let cards = deck::Deck::with_seed(seed).shuffled();
    serde_wasm_bindgen::to_value(&cards)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn run_simulation(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = sim::run(input)
        .map_err(|err| JsValue::from_str(&format!("Simulation failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

#[wasm_bindgen]
pub fn run_simulation_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let mut progress_cb = |current: u32, total: u32| {
        let _ = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        );
    };

    let result = sim::run_with_progress(input, &mut progress_cb)
        .map_err(|err| JsValue::from_str(&format!("Simulation failed: {err}")))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
