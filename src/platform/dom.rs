//! DOM renderer
//!
//! Builds the nine cell elements inside `#grid` and mirrors controller output
//! into the page. Transient effects clear themselves with `setTimeout`; each
//! one checks a generation counter first so a late callback never wipes a
//! newer effect.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::sim::{CellState, FeedbackKind, Outcome, Renderer, RoundStats};

const CAN_GLYPH: &str = "\u{1F96B}";
const OBSTACLE_GLYPH: &str = "\u{1F4A3}";

/// Run `f` once after `ms`
fn set_timeout(f: impl FnOnce() + 'static, ms: i32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        .is_err()
    {
        log::warn!("setTimeout failed");
    }
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

pub struct DomRenderer {
    cells: Vec<Element>,
    score: Option<Element>,
    timer: Option<Element>,
    message: Option<Element>,
    achievement: Option<Element>,
    confetti: Option<Element>,
    collected: Option<Element>,
    penalties: Option<Element>,
    misses: Option<Element>,
    audio: AudioManager,
    /// Bumped per cell on every flash
    feedback_gen: Rc<[Cell<u64>; GRID_CELLS]>,
    achievement_gen: Rc<Cell<u64>>,
    celebration_gen: Rc<Cell<u64>>,
}

impl DomRenderer {
    /// Build the grid under `#grid`. Returns `None` if the page has no grid.
    pub fn new(document: &Document) -> Option<Self> {
        let grid = document.get_element_by_id("grid")?;
        grid.set_inner_html("");

        let mut cells = Vec::with_capacity(GRID_CELLS);
        for index in 0..GRID_CELLS {
            let cell = document.create_element("div").ok()?;
            cell.set_class_name("cell");
            cell.set_attribute("data-index", &index.to_string()).ok()?;
            grid.append_child(&cell).ok()?;
            cells.push(cell);
        }

        let by_id = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("Missing #{} element", id);
            }
            el
        };

        Some(Self {
            cells,
            score: by_id("score"),
            timer: by_id("timer"),
            message: by_id("message"),
            achievement: by_id("achievement"),
            confetti: by_id("confetti"),
            collected: by_id("stat-collected"),
            penalties: by_id("stat-penalties"),
            misses: by_id("stat-misses"),
            audio: AudioManager::new(),
            feedback_gen: Rc::new(std::array::from_fn(|_| Cell::new(0))),
            achievement_gen: Rc::new(Cell::new(0)),
            celebration_gen: Rc::new(Cell::new(0)),
        })
    }

    /// Cell elements in grid order, for wiring click handlers
    pub fn cells(&self) -> &[Element] {
        &self.cells
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }
}

impl Renderer for DomRenderer {
    fn render_grid(&mut self, cells: &[CellState; GRID_CELLS]) {
        for (el, state) in self.cells.iter().zip(cells.iter()) {
            let (class, glyph) = match state {
                CellState::Empty => ("", ""),
                CellState::Collectible => ("can", CAN_GLYPH),
                CellState::Obstacle(_) => ("obstacle", OBSTACLE_GLYPH),
            };
            let classes = el.class_list();
            let _ = classes.remove_2("can", "obstacle");
            if !class.is_empty() {
                let _ = classes.add_1(class);
            }
            el.set_text_content(Some(glyph));
        }
    }

    fn show_score(&mut self, score: u32) {
        set_text(&self.score, &score.to_string());
    }

    fn show_timer(&mut self, seconds: u32) {
        set_text(&self.timer, &seconds.to_string());
    }

    fn show_end_message(&mut self, text: &str, outcome: Outcome) {
        if let Some(el) = &self.message {
            el.set_text_content(Some(text));
            let class = match outcome {
                Outcome::Win => "message win",
                Outcome::Lose => "message lose",
            };
            el.set_class_name(class);
        }
        self.audio.play(match outcome {
            Outcome::Win => SoundEffect::Win,
            Outcome::Lose => SoundEffect::Lose,
        });
    }

    fn clear_end_message(&mut self) {
        if let Some(el) = &self.message {
            el.set_text_content(None);
            el.set_class_name("message hidden");
        }
        if let Some(el) = &self.confetti {
            self.celebration_gen.set(self.celebration_gen.get() + 1);
            let _ = el.class_list().remove_1("active");
        }
    }

    fn show_achievement(&mut self, text: &str) {
        let Some(el) = self.achievement.clone() else {
            return;
        };
        // A newer achievement takes over the display
        let generation = self.achievement_gen.get() + 1;
        self.achievement_gen.set(generation);

        el.set_text_content(Some(text));
        el.set_class_name("achievement show");
        self.audio.play(SoundEffect::Milestone);

        let current = self.achievement_gen.clone();
        set_timeout(
            move || {
                if current.get() != generation {
                    return;
                }
                el.set_class_name("achievement fade");
                set_timeout(
                    move || {
                        if current.get() == generation {
                            el.set_text_content(None);
                            el.set_class_name("achievement");
                        }
                    },
                    ACHIEVEMENT_CLEAR_DELAY_MS,
                );
            },
            ACHIEVEMENT_DISPLAY_MS,
        );
    }

    fn trigger_celebration(&mut self) {
        let Some(el) = self.confetti.clone() else {
            return;
        };
        let generation = self.celebration_gen.get() + 1;
        self.celebration_gen.set(generation);
        let _ = el.class_list().add_1("active");

        let current = self.celebration_gen.clone();
        set_timeout(
            move || {
                if current.get() == generation {
                    let _ = el.class_list().remove_1("active");
                }
            },
            CELEBRATION_MS,
        );
    }

    fn flash_cell_feedback(&mut self, cell: usize, kind: FeedbackKind) {
        let Some(el) = self.cells.get(cell).cloned() else {
            return;
        };
        let generation = self.feedback_gen[cell].get() + 1;
        self.feedback_gen[cell].set(generation);

        let classes = el.class_list();
        let _ = classes.remove_2("hit", "miss");
        let _ = classes.add_1(kind.css_class());
        self.audio.play(match kind {
            FeedbackKind::Hit => SoundEffect::Grab,
            FeedbackKind::Penalty => SoundEffect::Penalty,
            FeedbackKind::Miss => SoundEffect::Miss,
        });

        let gens = self.feedback_gen.clone();
        set_timeout(
            move || {
                // Element may have been rebuilt, or flashed again since
                if !el.is_connected() || gens[cell].get() != generation {
                    return;
                }
                let _ = el.class_list().remove_2("hit", "miss");
            },
            FEEDBACK_CLEAR_MS,
        );
    }

    fn show_stats(&mut self, stats: &RoundStats) {
        set_text(&self.collected, &stats.collected.to_string());
        set_text(&self.penalties, &stats.penalties.to_string());
        set_text(&self.misses, &stats.misses.to_string());
    }
}
