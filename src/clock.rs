use defmt::Format;

/// Starting budget per side: 5 minutes.
pub const INITIAL_BUDGET_MS: u32 = 5 * 60 * 1000;

/// Minimum interval after an accepted press during which further
/// presses are ignored.
pub const DEBOUNCE_HOLDOFF_MS: u32 = 200;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Format)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Display name shown on the OLED.
    pub fn label(self) -> &'static str {
        match self {
            Player::White => "Brancas",
            Player::Black => "Pretas",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Format)]
pub enum Phase {
    Running,
    Expired,
}

/// State of the clock between two ticks.
///
/// Owned exclusively by the main loop; `tick` is the only mutator.
/// `Expired` is absorbing: once a flag falls the remainders are frozen
/// for the final render.
#[derive(Debug, Format)]
pub struct ClockState {
    white_remaining_ms: u32,
    black_remaining_ms: u32,
    active: Player,
    phase: Phase,
    holdoff_ms: u32,
}

impl ClockState {
    pub fn new(budget_ms: u32) -> Self {
        Self {
            white_remaining_ms: budget_ms,
            black_remaining_ms: budget_ms,
            active: Player::White,
            phase: Phase::Running,
            holdoff_ms: 0,
        }
    }

    /// Advances the clock by `elapsed_ms` of wall time.
    ///
    /// `active_pressed` is the debounced level of the *active* side's
    /// button only; the inactive button must not be sampled. Expiry is
    /// checked before any turn switch, so a press on the same tick
    /// that empties the budget is ignored.
    pub fn tick(&mut self, elapsed_ms: u32, active_pressed: bool) {
        if self.phase == Phase::Expired {
            return;
        }

        self.holdoff_ms = self.holdoff_ms.saturating_sub(elapsed_ms);

        let remaining = match self.active {
            Player::White => &mut self.white_remaining_ms,
            Player::Black => &mut self.black_remaining_ms,
        };
        *remaining = remaining.saturating_sub(elapsed_ms);
        if *remaining == 0 {
            self.phase = Phase::Expired;
            return;
        }

        if active_pressed && self.holdoff_ms == 0 {
            self.active = self.active.opponent();
            self.holdoff_ms = DEBOUNCE_HOLDOFF_MS;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active(&self) -> Player {
        self.active
    }

    pub fn remaining_ms(&self, player: Player) -> u32 {
        match player {
            Player::White => self.white_remaining_ms,
            Player::Black => self.black_remaining_ms,
        }
    }

    /// The side whose budget did not run out. `None` while running.
    ///
    /// Only the active side is ever decremented, so exactly one
    /// remainder can be zero once `phase` is `Expired`.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Running => None,
            Phase::Expired => {
                if self.white_remaining_ms == 0 {
                    Some(Player::Black)
                } else {
                    Some(Player::White)
                }
            }
        }
    }
}
