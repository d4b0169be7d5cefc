use fnv::FnvHashMap;

/// Unordered pair of boundary cities identifying a 2-opt move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveSignature(usize, usize);

impl MoveSignature {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TabuEntry {
    /// Last iteration during which the signature is forbidden.
    pub tabu_until: usize,
    /// Decayed count of applications.
    pub frequency: f64,
}

/// Short-term recency table and medium-term frequency table, keyed by
/// [`MoveSignature`]. Entries live for the whole run.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    tenure: usize,
    decay_factor: f64,
    entries: FnvHashMap<MoveSignature, TabuEntry>,
}

impl TabuMemory {
    pub fn new(tenure: usize, decay_factor: f64) -> Self {
        Self {
            tenure,
            decay_factor,
            entries: FnvHashMap::default(),
        }
    }

    pub fn tenure(&self) -> usize {
        self.tenure
    }

    #[inline]
    pub fn is_tabu(&self, sig: MoveSignature, iteration: usize) -> bool {
        self.tenure > 0
            && self
                .entries
                .get(&sig)
                .is_some_and(|e| e.tabu_until > 0 && iteration <= e.tabu_until)
    }

    #[inline]
    pub fn frequency(&self, sig: MoveSignature) -> f64 {
        self.entries.get(&sig).map_or(0.0, |e| e.frequency)
    }

    /// Ages every frequency counter by one iteration.
    pub fn decay(&mut self) {
        let factor = self.decay_factor;
        for e in self.entries.values_mut() {
            e.frequency *= factor;
        }
    }

    /// Marks `sig` as applied at `iteration`: forbidden for the next
    /// `tenure` iterations and counted once more in the frequency table.
    pub fn record(&mut self, sig: MoveSignature, iteration: usize) {
        let tenure = self.tenure;
        let e = self.entries.entry(sig).or_default();
        if tenure > 0 {
            e.tabu_until = iteration.saturating_add(tenure);
        }
        e.frequency += 1.0;
    }
}
