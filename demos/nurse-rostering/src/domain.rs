//! Nurse rostering domain: nurses, shifts with staffing demand, and one
//! assignment entity per required slot.

use std::fmt;

use planforge::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShiftType {
    Early,
    Late,
    Night,
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftType::Early => "Early",
            ShiftType::Late => "Late",
            ShiftType::Night => "Night",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Nurse {
    pub name: String,
    pub days_off: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct Shift {
    pub day: u32,
    pub shift_type: ShiftType,
    pub required: usize,
}

/// Planning entity: one staffed slot of a shift.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: usize,
    pub shift: usize,
    pub nurse: Option<usize>,
}

impl PlanningId for Assignment {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

/// Planning solution: the roster of a planning window.
#[derive(Debug, Clone)]
pub struct Roster {
    pub nurses: Vec<Nurse>,
    pub shifts: Vec<Shift>,
    pub assignments: Vec<Assignment>,
    pub score: Option<HardSoftScore>,
}

impl Roster {
    /// Generates a week-long roster with a fixed pattern of days off.
    pub fn generate(nurse_count: usize, days: u32) -> Self {
        const NAMES: [&str; 8] = ["Ann", "Beth", "Cara", "Dina", "Emma", "Fay", "Gina", "Hana"];

        let nurses = (0..nurse_count)
            .map(|i| Nurse {
                name: NAMES
                    .get(i)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("Nurse {}", i + 1)),
                days_off: vec![(i as u32 % days) + 1],
            })
            .collect();

        let mut shifts = Vec::new();
        for day in 1..=days {
            shifts.push(Shift { day, shift_type: ShiftType::Early, required: 2 });
            shifts.push(Shift { day, shift_type: ShiftType::Late, required: 2 });
            shifts.push(Shift { day, shift_type: ShiftType::Night, required: 1 });
        }

        Roster {
            nurses,
            shifts,
            assignments: Vec::new(),
            score: None,
        }
    }

    /// Prints one line per shift with its assigned nurses.
    pub fn print(&self) {
        println!("\nRoster (score: {}):", self.score.map_or("-".to_string(), |s| s.to_string()));
        for (index, shift) in self.shifts.iter().enumerate() {
            let names: Vec<&str> = self
                .assignments
                .iter()
                .filter(|a| a.shift == index)
                .map(|a| match a.nurse {
                    Some(n) => self.nurses[n].name.as_str(),
                    None => "<open>",
                })
                .collect();
            println!("  day {} {:<5} | {}", shift.day, shift.shift_type, names.join(", "));
        }
    }
}

impl PlanningSolution for Roster {
    type Score = HardSoftScore;

    fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    fn set_score(&mut self, score: Option<HardSoftScore>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.assignments.iter().all(|a| a.nurse.is_some())
    }
}

impl DemandSolution for Roster {
    type Entity = Assignment;
    type Value = usize;
    type Date = u32;
    type Discriminator = ShiftType;

    fn demand_count(&self) -> usize {
        self.shifts.len()
    }

    fn initialization_weight(&self, demand_index: usize) -> InitializationWeight<u32, ShiftType> {
        let shift = &self.shifts[demand_index];
        InitializationWeight {
            demand_index,
            date: shift.day,
            required_count: shift.required,
            discriminator: shift.shift_type,
        }
    }

    fn candidate_values(&self, _demand_index: usize) -> Vec<usize> {
        (0..self.nurses.len()).collect()
    }

    fn mint_entity(&self, id: usize, demand_index: usize) -> Assignment {
        Assignment {
            id,
            shift: demand_index,
            nurse: None,
        }
    }

    fn entities(&self) -> &[Assignment] {
        &self.assignments
    }

    fn push_entity(&mut self, entity: Assignment) -> usize {
        self.assignments.push(entity);
        self.assignments.len() - 1
    }

    fn assigned_value(&self, entity_index: usize) -> Option<usize> {
        get_nurse(self, entity_index)
    }

    fn assign(&mut self, entity_index: usize, value: Option<usize>) {
        set_nurse(self, entity_index, value);
    }

    fn set_entities(&mut self, entities: Vec<Assignment>) {
        self.assignments = entities;
    }
}

fn assignment_count(s: &Roster) -> usize {
    s.assignments.len()
}

fn get_nurse(s: &Roster, idx: usize) -> Option<usize> {
    s.assignments.get(idx).and_then(|a| a.nurse)
}

fn set_nurse(s: &mut Roster, idx: usize, nurse: Option<usize>) {
    if let Some(assignment) = s.assignments.get_mut(idx) {
        assignment.nurse = nurse;
    }
}

fn nurse_range(s: &Roster) -> Vec<usize> {
    (0..s.nurses.len()).collect()
}

/// Accessor for the `nurse` variable of assignments.
pub fn nurse_variable() -> BasicVariable<Roster, usize> {
    BasicVariable::new("nurse", 0, assignment_count, get_nurse, set_nurse, nurse_range)
}

/// Scores a roster.
///
/// Hard: open slots, work on a day off, two shifts on one day, and an
/// early shift right after a night shift.
/// Soft: squared workload per nurse, so work is spread evenly.
pub fn calculate_score(roster: &Roster) -> HardSoftScore {
    let mut hard = 0i64;
    let mut workload = vec![0i64; roster.nurses.len()];
    let mut worked: Vec<Vec<(u32, ShiftType)>> = vec![Vec::new(); roster.nurses.len()];

    for assignment in &roster.assignments {
        let Some(nurse) = assignment.nurse else {
            hard -= 1;
            continue;
        };
        let Some(shift) = roster.shifts.get(assignment.shift) else {
            continue;
        };
        if roster.nurses[nurse].days_off.contains(&shift.day) {
            hard -= 1;
        }
        workload[nurse] += 1;
        worked[nurse].push((shift.day, shift.shift_type));
    }

    for days in &mut worked {
        days.sort();
        for pair in days.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            if first.0 == second.0 {
                hard -= 1;
            }
        }
        for &(day, shift_type) in days.iter() {
            if shift_type == ShiftType::Night
                && days.contains(&(day + 1, ShiftType::Early))
            {
                hard -= 1;
            }
        }
    }

    let soft = -workload.iter().map(|w| w * w).sum::<i64>();
    HardSoftScore::of(hard, soft)
}
