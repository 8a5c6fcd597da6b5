use crate::player::{Player, Position};

/// Button placement and seat arithmetic for a table of 2 to 9 seats.
///
/// Blinds and first-to-act seats are fixed offsets from the button, taken
/// modulo the table size. Heads-up this puts the big blind on the button and
/// lets the other seat act first on every street.
#[derive(Debug, Clone)]
pub struct Seating {
    seats: usize,
    button: usize,
}

impl Seating {
    /// The button starts one seat before seat 0, so the first
    /// [`Seating::rotate_button`] places it on seat 0.
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            button: seats.saturating_sub(1),
        }
    }

    pub fn seats(&self) -> usize {
        self.seats
    }
    pub fn button(&self) -> usize {
        self.button
    }

    pub fn rotate_button(&mut self) {
        self.button = (self.button + 1) % self.seats;
    }

    pub fn small_blind_seat(&self) -> usize {
        self.after_button(1)
    }
    pub fn big_blind_seat(&self) -> usize {
        self.after_button(2)
    }
    /// Seat following the big blind. Every betting round opens here.
    pub fn first_to_act(&self) -> usize {
        self.after_button(3)
    }
    /// First seat left of the button; odd chips of a split pot start here.
    pub fn left_of_button(&self) -> usize {
        self.after_button(1)
    }

    /// How many seats `seat` sits after the button.
    pub fn offset(&self, seat: usize) -> usize {
        (seat + self.seats - self.button) % self.seats
    }

    /// Every seat once, in acting order beginning at `start`.
    pub fn order_from(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.seats).map(move |i| (start + i) % self.seats)
    }

    pub fn sync_positions(&self, players: &mut [Player]) {
        for (seat, p) in players.iter_mut().enumerate() {
            p.set_position(Position::from_offset(self.offset(seat)));
        }
    }

    fn after_button(&self, n: usize) -> usize {
        (self.button + n) % self.seats
    }
}
