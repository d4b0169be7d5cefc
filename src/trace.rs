//! Line-oriented run trace consumed by the visualization scripts.
//!
//! ```text
//! TOUR 0 1 3 2
//! VALUE 4
//! MOVE 1 2
//! TOUR 0 3 1 2
//! VALUE 4.82842712474619
//! ...
//! FINAL_SOLUTION
//! 0 1 3 2
//! FINAL_VALUE 4
//! ```
//!
//! Each `TOUR`/`VALUE` pair after the first is the state produced by the
//! `MOVE` right before it. `ASPIRATION_ACCEPTED` precedes a `MOVE` that was
//! tabu and admitted on aspiration.

use crate::error::DpResult;
use crate::optimizer::runner::{SearchObserver, SearchOutcome};
use crate::optimizer::Candidate;
use crate::tour::Tour;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct TraceWriter<W: Write> {
    out: W,
}

impl TraceWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> DpResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cities(&mut self, cities: &[usize]) -> DpResult<()> {
        for (k, city) in cities.iter().enumerate() {
            if k > 0 {
                self.out.write_all(b" ")?;
            }
            write!(self.out, "{}", city)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn write_state(&mut self, tour: &Tour) -> DpResult<()> {
        self.out.write_all(b"TOUR ")?;
        self.write_cities(tour.cities())?;
        writeln!(self.out, "VALUE {}", tour.length())?;
        Ok(())
    }
}

impl<W: Write> SearchObserver for TraceWriter<W> {
    fn on_start(&mut self, tour: &Tour) -> DpResult<()> {
        self.write_state(tour)
    }

    fn on_move(&mut self, _iteration: usize, candidate: &Candidate, tour: &Tour) -> DpResult<()> {
        if candidate.aspirated {
            writeln!(self.out, "ASPIRATION_ACCEPTED")?;
        }
        writeln!(self.out, "MOVE {} {}", candidate.mv.i, candidate.mv.j)?;
        self.write_state(tour)
    }

    fn on_stall(&mut self, _iteration: usize) -> DpResult<()> {
        writeln!(self.out, "NO legal neighbour")?;
        self.out.flush()?;
        Ok(())
    }

    fn on_finish(&mut self, outcome: &SearchOutcome) -> DpResult<()> {
        writeln!(self.out, "FINAL_SOLUTION")?;
        self.write_cities(&outcome.best_tour)?;
        writeln!(self.out, "FINAL_VALUE {}", outcome.best_cost)?;
        self.out.flush()?;
        Ok(())
    }
}
