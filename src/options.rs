/// Options to tune how transforms are planned and scaled.
///
/// Calling FFT routines without specifying options selects the defaults of the
/// underlying FFTW convention: cheap `Estimate` planning and unnormalised
/// inverse transforms.
///
/// You only need to tune these options if you run many transforms of the same
/// shape, where spending more time in the planner pays off, or if you want the
/// inverse transform to undo the forward one exactly.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub rigor: PlanRigor,
    /// Scale inverse transforms by `1 / N`, where `N` is the number of elements.
    pub normalize_inverse: bool,
}

impl Options {
    pub fn with_rigor(mut self, rigor: PlanRigor) -> Self {
        self.rigor = rigor;
        self
    }

    pub fn with_normalized_inverse(mut self, normalize: bool) -> Self {
        self.normalize_inverse = normalize;
        self
    }
}

/// How much effort FFTW spends searching for a fast plan.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlanRigor {
    #[default]
    /// Pick a reasonable plan from heuristics without running anything.
    ///
    /// This never touches the arrays handed to the planner.
    Estimate,
    /// Time a handful of candidate algorithms.
    Measure,
    /// Time a wider range of algorithms. Considerably slower to plan.
    Patient,
    /// Try everything. Only worth it for transforms executed very often.
    Exhaustive,
}

impl PlanRigor {
    pub(crate) fn flag(self) -> fftw::types::Flag {
        use fftw::types::Flag;
        match self {
            PlanRigor::Estimate => Flag::ESTIMATE,
            PlanRigor::Measure => Flag::MEASURE,
            PlanRigor::Patient => Flag::PATIENT,
            PlanRigor::Exhaustive => Flag::EXHAUSIVE,
        }
    }

    /// Whether planning with this rigor may overwrite the planner's arrays.
    pub(crate) fn clobbers_arrays(self) -> bool {
        self != PlanRigor::Estimate
    }
}
