// Heuristic resume analysis: lexicon-based skill detection, the ATS score
// breakdown, and JD keyword coverage. Everything here is a pure function of
// its text inputs.

pub mod ats;
pub mod handlers;
pub mod keywords;
pub mod skills;
