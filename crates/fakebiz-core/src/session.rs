//! Session-scoped state shared by the three stages.

use std::fmt;

/// One of the three independent generation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Brand,
    Logo,
    LandingPage,
}

impl StageKind {
    pub const ALL: [StageKind; 3] = [StageKind::Brand, StageKind::Logo, StageKind::LandingPage];

    pub fn label(&self) -> &'static str {
        match self {
            StageKind::Brand => "brand identity",
            StageKind::Logo => "logo",
            StageKind::LandingPage => "landing page",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a single stage.
///
/// `Idle -> Requesting -> Succeeded`; a failed request returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageState {
    #[default]
    Idle,
    Requesting,
    Succeeded,
}

/// Mutable state of one interactive session.
///
/// Constructed at session start and dropped at session end. The brand record
/// is the only datum handed from one stage to the next.
#[derive(Debug, Default)]
pub struct SessionState {
    brand_record: String,
    brand: StageState,
    logo: StageState,
    landing_page: StageState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markdown of the last successful brand generation, or `""`.
    pub fn brand_record(&self) -> &str {
        &self.brand_record
    }

    pub fn has_brand_record(&self) -> bool {
        !self.brand_record.is_empty()
    }

    pub fn stage_state(&self, stage: StageKind) -> StageState {
        match stage {
            StageKind::Brand => self.brand,
            StageKind::Logo => self.logo,
            StageKind::LandingPage => self.landing_page,
        }
    }

    pub(crate) fn replace_brand_record(&mut self, record: String) {
        self.brand_record = record;
    }

    pub(crate) fn begin(&mut self, stage: StageKind) {
        *self.slot(stage) = StageState::Requesting;
    }

    pub(crate) fn finish(&mut self, stage: StageKind, succeeded: bool) {
        *self.slot(stage) = if succeeded {
            StageState::Succeeded
        } else {
            StageState::Idle
        };
    }

    fn slot(&mut self, stage: StageKind) -> &mut StageState {
        match stage {
            StageKind::Brand => &mut self.brand,
            StageKind::Logo => &mut self.logo,
            StageKind::LandingPage => &mut self.landing_page,
        }
    }
}
