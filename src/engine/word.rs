use crate::{effects::fade::Visibility, render::surface::ElementHandle};

/// Identity of one activation, unique within a run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct WordId(pub u64);

#[derive(Clone, Debug, PartialEq)]
/// Runtime projection of a token currently on the stage.
pub struct ActiveWord {
    pub id: WordId,
    /// Index of the owning token in the script.
    pub token_index: usize,
    pub text: String,
    /// `None` when the host failed to create the element; layout still tracks the word.
    pub handle: Option<ElementHandle>,
    /// Measured once at activation with every slot occupied, so it never changes afterwards.
    pub width: f64,
    pub current_x: f64,
    pub target_x: f64,
    pub slots: usize,
    shown: Vec<bool>,
    /// Visibility computed on the most recent frame.
    pub visibility: Visibility,
}

impl ActiveWord {
    pub fn new(
        id: WordId,
        token_index: usize,
        text: impl Into<String>,
        handle: Option<ElementHandle>,
        width: f64,
        slots: usize,
        start_x: f64,
    ) -> Self {
        Self {
            id,
            token_index,
            text: text.into(),
            handle,
            width,
            current_x: start_x,
            target_x: start_x,
            slots,
            shown: vec![false; slots],
            visibility: Visibility::FULL,
        }
    }

    /// Characters revealed so far. Only ever grows, and never past `slots`.
    pub fn revealed(&self) -> usize {
        self.shown.iter().filter(|s| **s).count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.shown.iter().all(|s| *s)
    }

    /// Returns `false` when the slot was already shown or does not exist.
    pub(crate) fn mark_revealed(&mut self, slot: usize) -> bool {
        match self.shown.get_mut(slot) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Mark every hidden slot as shown and return them in slot order.
    pub(crate) fn reveal_rest(&mut self) -> Vec<usize> {
        let pending: Vec<usize> = self
            .shown
            .iter()
            .enumerate()
            .filter(|(_, shown)| !**shown)
            .map(|(slot, _)| slot)
            .collect();
        self.shown.iter_mut().for_each(|s| *s = true);
        pending
    }
}
