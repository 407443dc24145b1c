use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Where the board is in its turn cycle.
///
/// The current selection lives inside the phase: at most one card can be pending while the board accepts input, and
/// a pair only exists while it is being resolved. There is never more than one [`Flip`] in flight.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Idle {
        pending: Option<Cell>,
    },
    Animating {
        flip: Flip,
        pending: Option<Cell>,
    },
    Resolving {
        pair: (Cell, Cell),
        step: Resolution,
    },
    Won {
        announce_at: Millis,
        announced: bool,
    },
}

impl Phase {
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Animating { .. } | Self::Resolving { .. })
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle { pending: None }
    }
}

/// Steps taken after a mismatched pair: a pause, then both cards flip back one after the other.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Pause { until: Millis },
    RevertFirst(Flip),
    RevertSecond(Flip),
}

#[derive(Clone, Debug)]
pub struct Board<R> {
    config: BoardConfig,
    cards: Array2<Card>,
    matched_pairs: CellCount,
    phase: Phase,
    rng: R,
}

impl<R: rand::Rng> Board<R> {
    /// Starts a round with a freshly shuffled deal drawn from `rng`.
    pub fn new(config: BoardConfig, mut rng: R) -> Result<Self> {
        let deal = RandomDealGenerator::new(&mut rng).generate(&config)?;
        Self::with_deal(config, deal, rng)
    }

    /// Starts a round with a fixed deal, later rounds are still shuffled with `rng`.
    pub fn with_deal(config: BoardConfig, deal: Deal, rng: R) -> Result<Self> {
        config.validate()?;
        if deal.size() != (config.rows, config.columns) {
            return Err(GameError::InvalidDeal);
        }

        log::debug!(
            "new board: {}x{}, {} pairs",
            config.columns,
            config.rows,
            config.total_pairs()
        );
        Ok(Self {
            cards: deal.lay_out(&config),
            config,
            matched_pairs: 0,
            phase: Phase::default(),
            rng,
        })
    }

    /// Discards the round and deals a new shuffled one.
    pub fn reset(&mut self) -> Result<()> {
        let deal = RandomDealGenerator::new(&mut self.rng).generate(&self.config)?;
        self.cards = deal.lay_out(&self.config);
        self.matched_pairs = 0;
        self.phase = Phase::default();
        log::debug!("board reset");
        Ok(())
    }
}

impl<R> Board<R> {
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn cards(&self) -> &Array2<Card> {
        &self.cards
    }

    pub fn card(&self, cell: Cell) -> Option<&Card> {
        self.cards.get(cell.to_nd_index())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn matched_pairs(&self) -> CellCount {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> CellCount {
        self.config.total_pairs()
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won { .. })
    }

    pub fn victory_announced(&self) -> bool {
        matches!(self.phase, Phase::Won { announced: true, .. })
    }

    /// Whether anything is scheduled, the host should keep calling [`Board::tick`] while this holds.
    pub fn needs_frames(&self) -> bool {
        match self.phase {
            Phase::Idle { .. } => false,
            Phase::Animating { .. } | Phase::Resolving { .. } => true,
            Phase::Won { announced, .. } => !announced,
        }
    }

    /// Face-up cards waiting to be resolved, never more than two.
    pub fn selected(&self) -> SmallVec<[Cell; 2]> {
        match self.phase {
            Phase::Idle { pending } | Phase::Animating { pending, .. } => {
                pending.into_iter().collect()
            }
            Phase::Resolving { pair: (first, second), .. } => smallvec![first, second],
            Phase::Won { .. } => SmallVec::new(),
        }
    }

    pub fn handle_tap(&mut self, point: Point, now: Millis) -> TapOutcome {
        let Phase::Idle { pending } = self.phase else {
            log::trace!("tap at {:?} ignored, board is {:?}", point, self.phase);
            return TapOutcome::Ignored;
        };

        let hit = self
            .cards
            .indexed_iter()
            .find(|(_, card)| card.hit_test(point) && !card.is_revealed())
            .map(|((row, column), _)| (row as Coord, column as Coord));

        let Some(cell) = hit else {
            return TapOutcome::Ignored;
        };

        log::debug!("reveal card: {:?}", cell);
        let flip = self.begin_flip(cell, true, now);
        self.phase = Phase::Animating { flip, pending };
        TapOutcome::Flipping(cell)
    }

    /// Advances animations and scheduled steps up to `now`, reporting the most significant thing that happened.
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        let mut outcome = TickOutcome::NoChange;
        loop {
            let (step, settled) = self.step(now);
            outcome = outcome | step;
            if settled {
                return outcome;
            }
        }
    }

    pub fn render<S, F>(&self, surface: &mut S, images: &F)
    where
        S: Surface,
        F: FaceImages<S::Image> + ?Sized,
    {
        surface.clear(self.config.surface_size());
        for card in self.cards.iter() {
            card.render(surface, images, &self.config.style);
        }
    }

    /// Runs one transition; the flag is set once nothing else is due at `now`.
    fn step(&mut self, now: Millis) -> (TickOutcome, bool) {
        use Resolution::*;
        use TickOutcome::*;

        match self.phase {
            Phase::Idle { .. } | Phase::Won { announced: true, .. } => (NoChange, true),
            Phase::Won {
                announce_at,
                announced: false,
            } => {
                if now < announce_at {
                    return (NoChange, true);
                }
                log::debug!("round won");
                self.phase = Phase::Won {
                    announce_at,
                    announced: true,
                };
                (Victory, true)
            }
            Phase::Animating { flip, pending } => {
                if !self.advance(&flip, now) {
                    return (Animated, true);
                }
                let cell = flip.cell();
                let outcome = match pending {
                    None => {
                        self.phase = Phase::Idle {
                            pending: Some(cell),
                        };
                        Revealed
                    }
                    Some(first) => self.resolve((first, cell), flip.ends_at()),
                };
                (outcome, false)
            }
            Phase::Resolving {
                pair,
                step: Pause { until },
            } => {
                if now < until {
                    return (NoChange, true);
                }
                let flip = self.begin_flip(pair.0, false, until);
                self.phase = Phase::Resolving {
                    pair,
                    step: RevertFirst(flip),
                };
                (NoChange, false)
            }
            Phase::Resolving {
                pair,
                step: RevertFirst(flip),
            } => {
                if !self.advance(&flip, now) {
                    return (Animated, true);
                }
                let flip = self.begin_flip(pair.1, false, flip.ends_at());
                self.phase = Phase::Resolving {
                    pair,
                    step: RevertSecond(flip),
                };
                (Animated, false)
            }
            Phase::Resolving {
                pair,
                step: RevertSecond(flip),
            } => {
                if !self.advance(&flip, now) {
                    return (Animated, true);
                }
                log::debug!("pair {:?} turned back", pair);
                self.phase = Phase::default();
                (Reverted, false)
            }
        }
    }

    fn resolve(&mut self, pair: (Cell, Cell), at: Millis) -> TickOutcome {
        let first = self.cards[pair.0.to_nd_index()].face();
        let second = self.cards[pair.1.to_nd_index()].face();

        if first == second {
            self.matched_pairs += 1;
            log::debug!(
                "matched face {} ({}/{})",
                first,
                self.matched_pairs,
                self.total_pairs()
            );
            self.phase = if self.matched_pairs == self.total_pairs() {
                Phase::Won {
                    announce_at: at + self.config.timing.victory_delay,
                    announced: false,
                }
            } else {
                Phase::default()
            };
            TickOutcome::Matched
        } else {
            log::debug!("mismatch: {} vs {}", first, second);
            self.phase = Phase::Resolving {
                pair,
                step: Resolution::Pause {
                    until: at + self.config.timing.mismatch_pause,
                },
            };
            TickOutcome::Mismatched
        }
    }

    fn begin_flip(&self, cell: Cell, reveal: bool, at: Millis) -> Flip {
        let from = self.cards[cell.to_nd_index()].flip_progress();
        Flip::new(cell, from, reveal, at, self.config.timing.flip)
    }

    /// Applies `flip` to its card, returning whether it finished.
    fn advance(&mut self, flip: &Flip, now: Millis) -> bool {
        let card = &mut self.cards[flip.cell().to_nd_index()];
        if flip.is_done(now) {
            card.settle(flip.reveals());
            true
        } else {
            card.set_flip_progress(flip.angle_at(now));
            log::trace!("{:?} at {:.3}", flip.cell(), card.flip_progress());
            false
        }
    }
}
