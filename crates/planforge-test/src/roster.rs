//! Nurse rostering test fixtures.
//!
//! Shifts are demand units: a shift requiring K nurses expands into K
//! [`ShiftAssignment`] entities, each assigned one employee.
//!
//! # Example
//!
//! ```
//! use planforge_core::DemandSolution;
//! use planforge_test::roster::{NurseRoster, ShiftKind};
//!
//! let roster = NurseRoster::builder()
//!     .employee("Ann")
//!     .employee("Beth")
//!     .shift(1, ShiftKind::Early, 2)
//!     .build();
//! assert_eq!(roster.demand_count(), 1);
//! assert!(roster.assignments.is_empty());
//! ```

use planforge_core::domain::{
    BasicVariable, DemandSolution, InitializationWeight, PlanningId, PlanningSolution,
};
use planforge_core::score::HardSoftScore;

/// Type of a shift; used as secondary ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftKind {
    Early,
    Late,
    Night,
}

/// A nurse that can be assigned to shifts.
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub name: String,
    /// Dates the employee cannot work.
    pub unavailable: Vec<u32>,
}

/// A shift demanding a number of nurses.
#[derive(Clone, Debug, PartialEq)]
pub struct Shift {
    pub date: u32,
    pub kind: ShiftKind,
    pub required: usize,
}

/// One required slot of a shift.
#[derive(Clone, Debug, PartialEq)]
pub struct ShiftAssignment {
    pub id: usize,
    pub shift: usize,
    pub employee: Option<usize>,
}

impl PlanningId for ShiftAssignment {
    type Id = usize;

    fn planning_id(&self) -> usize {
        self.id
    }
}

/// Nurse rostering solution.
#[derive(Clone, Debug)]
pub struct NurseRoster {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub assignments: Vec<ShiftAssignment>,
    pub score: Option<HardSoftScore>,
}

impl NurseRoster {
    pub fn builder() -> NurseRosterBuilder {
        NurseRosterBuilder::default()
    }

    /// Returns `(assignment id, shift, employee)` for every assignment, in list order.
    pub fn summary(&self) -> Vec<(usize, usize, Option<usize>)> {
        self.assignments
            .iter()
            .map(|a| (a.id, a.shift, a.employee))
            .collect()
    }
}

/// Builder for [`NurseRoster`].
#[derive(Debug, Default)]
pub struct NurseRosterBuilder {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
}

impl NurseRosterBuilder {
    pub fn employee(mut self, name: &str) -> Self {
        self.employees.push(Employee {
            name: name.to_string(),
            unavailable: Vec::new(),
        });
        self
    }

    pub fn unavailable_employee(mut self, name: &str, dates: &[u32]) -> Self {
        self.employees.push(Employee {
            name: name.to_string(),
            unavailable: dates.to_vec(),
        });
        self
    }

    pub fn shift(mut self, date: u32, kind: ShiftKind, required: usize) -> Self {
        self.shifts.push(Shift {
            date,
            kind,
            required,
        });
        self
    }

    pub fn build(self) -> NurseRoster {
        NurseRoster {
            employees: self.employees,
            shifts: self.shifts,
            assignments: Vec::new(),
            score: None,
        }
    }
}

impl PlanningSolution for NurseRoster {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        let required: usize = self.shifts.iter().map(|s| s.required).sum();
        self.assignments.len() == required && self.assignments.iter().all(|a| a.employee.is_some())
    }
}

impl DemandSolution for NurseRoster {
    type Entity = ShiftAssignment;
    type Value = usize;
    type Date = u32;
    type Discriminator = ShiftKind;

    fn demand_count(&self) -> usize {
        self.shifts.len()
    }

    fn initialization_weight(&self, demand_index: usize) -> InitializationWeight<u32, ShiftKind> {
        let shift = &self.shifts[demand_index];
        InitializationWeight {
            demand_index,
            date: shift.date,
            required_count: shift.required,
            discriminator: shift.kind,
        }
    }

    fn candidate_values(&self, _demand_index: usize) -> Vec<usize> {
        (0..self.employees.len()).collect()
    }

    fn mint_entity(&self, id: usize, demand_index: usize) -> ShiftAssignment {
        ShiftAssignment {
            id,
            shift: demand_index,
            employee: None,
        }
    }

    fn entities(&self) -> &[ShiftAssignment] {
        &self.assignments
    }

    fn push_entity(&mut self, entity: ShiftAssignment) -> usize {
        self.assignments.push(entity);
        self.assignments.len() - 1
    }

    fn assigned_value(&self, entity_index: usize) -> Option<usize> {
        self.assignments.get(entity_index).and_then(|a| a.employee)
    }

    fn assign(&mut self, entity_index: usize, value: Option<usize>) {
        set_employee(self, entity_index, value);
    }

    fn set_entities(&mut self, entities: Vec<ShiftAssignment>) {
        self.assignments = entities;
    }
}

pub fn assignment_count(s: &NurseRoster) -> usize {
    s.assignments.len()
}

pub fn get_employee(s: &NurseRoster, idx: usize) -> Option<usize> {
    s.assignments.get(idx).and_then(|a| a.employee)
}

pub fn set_employee(s: &mut NurseRoster, idx: usize, employee: Option<usize>) {
    if let Some(assignment) = s.assignments.get_mut(idx) {
        assignment.employee = employee;
    }
}

pub fn employee_range(s: &NurseRoster) -> Vec<usize> {
    (0..s.employees.len()).collect()
}

/// Creates the accessor for the `employee` variable of shift assignments.
pub fn employee_variable() -> BasicVariable<NurseRoster, usize> {
    BasicVariable::new(
        "employee",
        0,
        assignment_count,
        get_employee,
        set_employee,
        employee_range,
    )
}

/// Scores a roster.
///
/// Hard: one point per unassigned slot, per unavailable-date assignment,
/// and per extra shift an employee works on the same date.
/// Soft: the sum of squared workloads, which favours an even spread.
pub fn calculate_roster_score(s: &NurseRoster) -> HardSoftScore {
    let mut hard = 0;
    let mut workload = vec![0i64; s.employees.len()];
    let mut worked: Vec<(usize, u32)> = Vec::new();

    for assignment in &s.assignments {
        let employee = match assignment.employee {
            Some(e) => e,
            None => {
                hard -= 1;
                continue;
            }
        };
        let date = s.shifts.get(assignment.shift).map(|sh| sh.date).unwrap_or(0);
        if let Some(info) = s.employees.get(employee) {
            if info.unavailable.contains(&date) {
                hard -= 1;
            }
        }
        if worked.contains(&(employee, date)) {
            hard -= 1;
        } else {
            worked.push((employee, date));
        }
        if let Some(load) = workload.get_mut(employee) {
            *load += 1;
        }
    }

    let soft: i64 = workload.iter().map(|w| w * w).sum();
    HardSoftScore::of(hard, -soft)
}
