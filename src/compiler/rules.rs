//! Rule family compilers.
//!
//! One compile function per rule family. Every function shares the same
//! contract: read the rule configuration and the variable space, add
//! constraints to the model, and return the penalty terms the rule
//! contributes (empty for hard rules). A validation failure — unknown
//! shift/employee/floor reference, empty cohort, non-positive bound,
//! out-of-horizon date, negative weight — skips that single rule
//! instance with a `warn!` diagnostic and returns `None`; it never
//! aborts model construction.

use tracing::{debug, warn};

use super::{assignment_var, PenaltyTerm, ShiftModelBuilder};
use crate::cp::Literal;
use crate::models::{EmployeeStatus, EmploymentType, Rule, RuleMode, WorkdayMode};

impl ShiftModelBuilder<'_> {
    pub(super) fn compile_rule(&mut self, rule: &Rule) -> Option<Vec<PenaltyTerm>> {
        match rule {
            Rule::StaffingTarget {
                floor,
                shift,
                target,
                mode,
                under_weight,
                over_weight,
            } => self.compile_staffing(floor, shift, *target, *mode, *under_weight, *over_weight),
            Rule::MinHolidays {
                employment,
                min_days,
                mode,
                weight,
            } => self.compile_min_holidays(*employment, *min_days, *mode, *weight),
            Rule::MaxConsecutiveWorkdays {
                max_days,
                working_shifts,
                mode,
                weight,
            } => self.compile_max_consecutive(*max_days, working_shifts, *mode, *weight),
            Rule::SequentialShift {
                previous,
                next,
                mode,
                weight,
            } => self.compile_sequential(previous, next, *mode, *weight),
            Rule::AssignmentBalance {
                employment,
                shift,
                max_gap,
                mode,
                weight,
            } => self.compile_balance(*employment, shift, *max_gap, *mode, *weight),
            Rule::ShiftRequest {
                employee_id,
                date,
                shift,
                mode,
                weight,
            } => self.compile_request(employee_id, *date, shift, *mode, *weight),
            Rule::AvoidSameShift {
                first,
                second,
                shifts,
            } => self.compile_avoid_pair(first, second, shifts),
            Rule::TotalWorkdays {
                employee_id,
                target,
                mode,
                weight,
            } => self.compile_total_workdays(employee_id, *target, *mode, *weight),
            Rule::WeekendRest {
                employee_ids,
                mode,
                weight,
            } => self.compile_weekend_rest(employee_ids.as_deref(), *mode, *weight),
            Rule::ForcedLeave { statuses } => self.compile_forced_leave(statuses),
        }
    }

    /// Resolves a shift name, warning on failure.
    fn resolve_shift(&self, name: &str) -> Option<usize> {
        let index = self.config.shift_set.index_of(name);
        if index.is_none() {
            warn!(shift = name, "unknown shift name; rule skipped");
        }
        index
    }

    /// Resolves an employee id, warning on failure.
    fn resolve_employee(&self, id: &str) -> Option<usize> {
        let index = self.employees.iter().position(|e| e.id == id);
        if index.is_none() {
            warn!(employee = id, "unknown employee id; rule skipped");
        }
        index
    }

    /// Checks a penalty weight, warning when negative.
    fn check_weight(&self, weight: i64) -> bool {
        if weight < 0 {
            warn!(weight, "negative penalty weight; rule skipped");
            return false;
        }
        true
    }

    fn floor_cohort(&self, floor: &str) -> Vec<usize> {
        (0..self.employees.len())
            .filter(|&e| self.employees[e].floor == floor)
            .collect()
    }

    fn employment_cohort(&self, employment: EmploymentType) -> Vec<usize> {
        (0..self.employees.len())
            .filter(|&e| self.employees[e].employment == employment)
            .collect()
    }

    /// Staffing target: cohort headcount per (floor, date, shift).
    fn compile_staffing(
        &mut self,
        floor: &str,
        shift: &str,
        target: i64,
        mode: RuleMode,
        under_weight: i64,
        over_weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        if target < 0 {
            warn!(floor, shift, target, "negative staffing target; rule skipped");
            return None;
        }
        let s = self.resolve_shift(shift)?;
        let cohort = self.floor_cohort(floor);
        if cohort.is_empty() {
            warn!(floor, "no employees on floor; rule skipped");
            return None;
        }
        if mode == RuleMode::Soft && (!self.check_weight(under_weight) || !self.check_weight(over_weight)) {
            return None;
        }

        let mut penalties = Vec::new();
        for d in 0..self.config.horizon.len() {
            let mut terms: Vec<(String, i64)> = cohort
                .iter()
                .map(|&e| (assignment_var(e, d, s), 1))
                .collect();

            match mode {
                RuleMode::Hard => self.model.add_linear_eq(terms, target),
                RuleMode::Soft => {
                    let shortage = format!("r{}_staff_short_d{d}", self.rule_seq);
                    let excess = format!("r{}_staff_excess_d{d}", self.rule_seq);
                    self.model.new_int(&shortage, 0, target);
                    self.model
                        .new_int(&excess, 0, (cohort.len() as i64 - target).max(0));

                    // target - actual == shortage - excess
                    terms.push((shortage.clone(), 1));
                    terms.push((excess.clone(), -1));
                    self.model.add_linear_eq(terms, target);

                    if under_weight > 0 {
                        penalties.push(PenaltyTerm::new(shortage, under_weight));
                    }
                    if over_weight > 0 {
                        penalties.push(PenaltyTerm::new(excess, over_weight));
                    }
                }
            }
        }
        Some(penalties)
    }

    /// Minimum rest-shift days per employee of an employment category.
    fn compile_min_holidays(
        &mut self,
        employment: EmploymentType,
        min_days: i64,
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        if min_days <= 0 {
            warn!(min_days, "non-positive minimum holidays; rule skipped");
            return None;
        }
        if mode == RuleMode::Soft && !self.check_weight(weight) {
            return None;
        }
        let cohort = self.employment_cohort(employment);
        if cohort.is_empty() {
            warn!(?employment, "empty employment cohort; rule skipped");
            return None;
        }

        let rest = self.config.shift_set.rest_index();
        let days = self.config.horizon.len();
        let mut penalties = Vec::new();
        for &e in &cohort {
            let mut terms: Vec<(String, i64)> =
                (0..days).map(|d| (assignment_var(e, d, rest), 1)).collect();

            match mode {
                RuleMode::Hard => self.model.add_linear_ge(terms, min_days),
                RuleMode::Soft => {
                    let shortfall = format!("r{}_holiday_short_e{e}", self.rule_seq);
                    self.model.new_int(&shortfall, 0, min_days);
                    // actual + shortfall >= min_days
                    terms.push((shortfall.clone(), 1));
                    self.model.add_linear_ge(terms, min_days);
                    if weight > 0 {
                        penalties.push(PenaltyTerm::new(shortfall, weight));
                    }
                }
            }
        }
        Some(penalties)
    }

    /// Sliding-window cap on consecutive working days.
    ///
    /// One constraint per (employee, window of `max_days + 1` dates)
    /// across the whole horizon.
    fn compile_max_consecutive(
        &mut self,
        max_days: i64,
        working_shifts: &[String],
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        if max_days <= 0 {
            warn!(max_days, "non-positive consecutive-day bound; rule skipped");
            return None;
        }
        if mode == RuleMode::Soft && !self.check_weight(weight) {
            return None;
        }
        if working_shifts.is_empty() {
            warn!("empty working-shift list; rule skipped");
            return None;
        }
        let mut shift_indices = Vec::with_capacity(working_shifts.len());
        for name in working_shifts {
            shift_indices.push(self.resolve_shift(name)?);
        }
        // A repeated name must not double its coefficient in the window sum.
        shift_indices.sort_unstable();
        shift_indices.dedup();

        let window = max_days as usize + 1;
        let days = self.config.horizon.len();
        if days < window {
            debug!(max_days, days, "horizon shorter than window; nothing to constrain");
            return Some(Vec::new());
        }

        let mut penalties = Vec::new();
        for e in 0..self.employees.len() {
            for start in 0..=(days - window) {
                let mut terms: Vec<(String, i64)> = (start..start + window)
                    .flat_map(|d| shift_indices.iter().map(move |&s| (assignment_var(e, d, s), 1)))
                    .collect();

                match mode {
                    RuleMode::Hard => self.model.add_linear_le(terms, max_days),
                    RuleMode::Soft => {
                        let excess = format!("r{}_consec_excess_e{e}_w{start}", self.rule_seq);
                        self.model.new_int(&excess, 0, window as i64 - max_days);
                        // sum(window) - max_days <= excess
                        terms.push((excess.clone(), -1));
                        self.model.add_linear_le(terms, max_days);
                        if weight > 0 {
                            penalties.push(PenaltyTerm::new(excess, weight));
                        }
                    }
                }
            }
        }
        Some(penalties)
    }

    /// Sequential-shift pairing: `previous` on d implies `next` on d+1.
    ///
    /// The soft form only forces a violation indicator true when the
    /// pairing breaks (¬previous ∨ next ∨ violation); minimization is
    /// what drives unforced indicators to false. A zero weight leaves
    /// the pairing unenforced.
    fn compile_sequential(
        &mut self,
        previous: &str,
        next: &str,
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        let prev = self.resolve_shift(previous)?;
        let next = self.resolve_shift(next)?;
        if mode == RuleMode::Soft && !self.check_weight(weight) {
            return None;
        }

        let days = self.config.horizon.len();
        let mut penalties = Vec::new();
        for e in 0..self.employees.len() {
            for d in 0..days.saturating_sub(1) {
                let prev_var = assignment_var(e, d, prev);
                let next_var = assignment_var(e, d + 1, next);
                match mode {
                    RuleMode::Hard => self.model.add_implication(prev_var, next_var),
                    RuleMode::Soft => {
                        if weight == 0 {
                            continue;
                        }
                        let violation = format!("r{}_seq_viol_e{e}_d{d}", self.rule_seq);
                        self.model.new_bool(&violation);
                        self.model.add_clause(vec![
                            Literal::neg(prev_var),
                            Literal::pos(next_var),
                            Literal::pos(&violation),
                        ]);
                        penalties.push(PenaltyTerm::new(violation, weight));
                    }
                }
            }
        }
        Some(penalties)
    }

    /// Min–max spread of per-employee shift counts across a cohort.
    ///
    /// Encoded pairwise: `count(e) - count(f) <= bound` for every
    /// ordered cohort pair, where the bound is `max_gap` (hard) or a
    /// penalized spread variable (soft).
    fn compile_balance(
        &mut self,
        employment: EmploymentType,
        shift: &str,
        max_gap: i64,
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        let s = self.resolve_shift(shift)?;
        let cohort = self.employment_cohort(employment);
        if cohort.len() <= 1 {
            warn!(?employment, cohort = cohort.len(), "cohort too small to balance; rule skipped");
            return None;
        }
        if mode == RuleMode::Hard && max_gap < 0 {
            warn!(max_gap, "negative balance gap; rule skipped");
            return None;
        }
        if mode == RuleMode::Soft && !self.check_weight(weight) {
            return None;
        }

        let days = self.config.horizon.len();
        let count_terms = |e: usize, coef: i64| -> Vec<(String, i64)> {
            (0..days).map(|d| (assignment_var(e, d, s), coef)).collect()
        };

        let gap = match mode {
            RuleMode::Hard => None,
            RuleMode::Soft => {
                if weight == 0 {
                    return Some(Vec::new());
                }
                let gap = format!("r{}_balance_gap", self.rule_seq);
                self.model.new_int(&gap, 0, days as i64);
                Some(gap)
            }
        };

        for &e in &cohort {
            for &f in &cohort {
                if e == f {
                    continue;
                }
                let mut terms = count_terms(e, 1);
                terms.extend(count_terms(f, -1));
                match &gap {
                    None => self.model.add_linear_le(terms, max_gap),
                    Some(gap) => {
                        // count(e) - count(f) - gap <= 0
                        terms.push((gap.clone(), -1));
                        self.model.add_linear_le(terms, 0);
                    }
                }
            }
        }

        Some(match gap {
            Some(gap) => vec![PenaltyTerm::new(gap, weight)],
            None => Vec::new(),
        })
    }

    /// A single employee's shift request for one date.
    fn compile_request(
        &mut self,
        employee_id: &str,
        date: chrono::NaiveDate,
        shift: &str,
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        let e = self.resolve_employee(employee_id)?;
        let s = self.resolve_shift(shift)?;
        let Some(d) = self.config.horizon.index_of(date) else {
            warn!(employee = employee_id, %date, "request date outside horizon; rule skipped");
            return None;
        };

        let requested = assignment_var(e, d, s);
        match mode {
            RuleMode::Hard => {
                self.model.fix_bool(&requested, true);
                Some(Vec::new())
            }
            RuleMode::Soft => {
                if !self.check_weight(weight) {
                    return None;
                }
                // requested + violation == 1: violation is true iff the
                // request was not honored.
                let violation = format!("r{}_req_viol", self.rule_seq);
                self.model.new_bool(&violation);
                self.model
                    .add_linear_eq(vec![(requested, 1), (violation.clone(), 1)], 1);
                if weight > 0 {
                    Some(vec![PenaltyTerm::new(violation, weight)])
                } else {
                    Some(Vec::new())
                }
            }
        }
    }

    /// Two employees never co-assigned to any listed shift. Hard only.
    fn compile_avoid_pair(
        &mut self,
        first: &str,
        second: &str,
        shifts: &[String],
    ) -> Option<Vec<PenaltyTerm>> {
        let e1 = self.resolve_employee(first)?;
        let e2 = self.resolve_employee(second)?;
        if e1 == e2 {
            warn!(employee = first, "avoid-pair references the same employee twice; rule skipped");
            return None;
        }
        if shifts.is_empty() {
            warn!("empty shift list for avoid-pair; rule skipped");
            return None;
        }
        let mut shift_indices = Vec::with_capacity(shifts.len());
        for name in shifts {
            shift_indices.push(self.resolve_shift(name)?);
        }

        for d in 0..self.config.horizon.len() {
            for &s in &shift_indices {
                self.model.add_linear_le(
                    vec![(assignment_var(e1, d, s), 1), (assignment_var(e2, d, s), 1)],
                    1,
                );
            }
        }
        Some(Vec::new())
    }

    /// Bound on one employee's total working days over the horizon.
    fn compile_total_workdays(
        &mut self,
        employee_id: &str,
        target: i64,
        mode: WorkdayMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        let e = self.resolve_employee(employee_id)?;
        if target < 0 {
            warn!(employee = employee_id, target, "negative workday target; rule skipped");
            return None;
        }
        let soft = matches!(
            mode,
            WorkdayMode::SoftExact | WorkdayMode::SoftMax | WorkdayMode::SoftMin
        );
        if soft && !self.check_weight(weight) {
            return None;
        }

        let days = self.config.horizon.len();
        let terms: Vec<(String, i64)> = self
            .config
            .shift_set
            .working_indices()
            .into_iter()
            .flat_map(|s| (0..days).map(move |d| (assignment_var(e, d, s), 1)))
            .collect();

        let mut penalties = Vec::new();
        match mode {
            WorkdayMode::Exact => self.model.add_linear_eq(terms, target),
            WorkdayMode::Max => self.model.add_linear_le(terms, target),
            WorkdayMode::Min => self.model.add_linear_ge(terms, target),
            WorkdayMode::SoftExact => {
                // Two-sided deviation: |actual - target| <= dev.
                let dev = format!("r{}_workday_dev", self.rule_seq);
                self.model.new_int(&dev, 0, days as i64);
                let mut upper = terms.clone();
                upper.push((dev.clone(), -1));
                self.model.add_linear_le(upper, target);
                let mut lower = terms;
                lower.push((dev.clone(), 1));
                self.model.add_linear_ge(lower, target);
                if weight > 0 {
                    penalties.push(PenaltyTerm::new(dev, weight));
                }
            }
            WorkdayMode::SoftMax => {
                let over = format!("r{}_workday_over", self.rule_seq);
                self.model.new_int(&over, 0, days as i64);
                let mut upper = terms;
                upper.push((over.clone(), -1));
                self.model.add_linear_le(upper, target);
                if weight > 0 {
                    penalties.push(PenaltyTerm::new(over, weight));
                }
            }
            WorkdayMode::SoftMin => {
                let under = format!("r{}_workday_under", self.rule_seq);
                self.model.new_int(&under, 0, days as i64);
                let mut lower = terms;
                lower.push((under.clone(), 1));
                self.model.add_linear_ge(lower, target);
                if weight > 0 {
                    penalties.push(PenaltyTerm::new(under, weight));
                }
            }
        }
        Some(penalties)
    }

    /// Rest-shift assignment on weekend and holiday dates.
    fn compile_weekend_rest(
        &mut self,
        employee_ids: Option<&[String]>,
        mode: RuleMode,
        weight: i64,
    ) -> Option<Vec<PenaltyTerm>> {
        let targets: Vec<usize> = match employee_ids {
            None => (0..self.employees.len()).collect(),
            Some(ids) => {
                if ids.is_empty() {
                    warn!("empty employee list for weekend rest; rule skipped");
                    return None;
                }
                let mut targets = Vec::with_capacity(ids.len());
                for id in ids {
                    targets.push(self.resolve_employee(id)?);
                }
                targets
            }
        };
        if mode == RuleMode::Soft && !self.check_weight(weight) {
            return None;
        }

        let rest = self.config.shift_set.rest_index();
        let off_days: Vec<usize> = (0..self.config.horizon.len())
            .filter(|&d| self.config.is_designated_off(self.config.horizon.date_at(d)))
            .collect();

        let mut penalties = Vec::new();
        for &e in &targets {
            for &d in &off_days {
                let rest_var = assignment_var(e, d, rest);
                match mode {
                    RuleMode::Hard => self.model.fix_bool(&rest_var, true),
                    RuleMode::Soft => {
                        let violation = format!("r{}_off_viol_e{e}_d{d}", self.rule_seq);
                        self.model.new_bool(&violation);
                        self.model
                            .add_linear_eq(vec![(rest_var, 1), (violation.clone(), 1)], 1);
                        if weight > 0 {
                            penalties.push(PenaltyTerm::new(violation, weight));
                        }
                    }
                }
            }
        }
        Some(penalties)
    }

    /// Status-matched employees hard-forced to rest on every date.
    fn compile_forced_leave(&mut self, statuses: &[EmployeeStatus]) -> Option<Vec<PenaltyTerm>> {
        if statuses.is_empty() {
            warn!("empty status list for forced leave; rule skipped");
            return None;
        }

        let rest = self.config.shift_set.rest_index();
        let matching: Vec<usize> = (0..self.employees.len())
            .filter(|&e| {
                self.employees[e]
                    .status
                    .is_some_and(|status| statuses.contains(&status))
            })
            .collect();
        if matching.is_empty() {
            warn!("no employees match forced-leave statuses; rule skipped");
            return None;
        }

        for &e in &matching {
            for d in 0..self.config.horizon.len() {
                self.model.fix_bool(&assignment_var(e, d, rest), true);
            }
        }
        Some(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{BranchBoundSolver, CpSolution, CpSolver, SolverConfig, SolverStatus};
    use crate::models::{Employee, Horizon, RosterConfig, ShiftSet};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn config(days: u32, shifts: &[&str]) -> RosterConfig {
        let shift_set = ShiftSet::new(
            shifts.iter().map(|s| s.to_string()).collect(),
            shifts.last().unwrap(),
        )
        .unwrap();
        // 2025-04-14 is a Monday; weekday-only horizons avoid weekend
        // interactions unless a test wants them.
        let horizon = Horizon::new(date(14), date(14 + days - 1)).unwrap();
        RosterConfig::new(shift_set, horizon)
    }

    fn floor_employees(n: usize) -> Vec<Employee> {
        (0..n)
            .map(|i| Employee::new(format!("E{i:02}"), format!("Emp {i}")).with_floor("1F"))
            .collect()
    }

    fn solve(employees: &[Employee], cfg: &RosterConfig, rules: &[Rule]) -> CpSolution {
        let mut builder = ShiftModelBuilder::new(employees, cfg);
        builder.apply_rules(rules);
        BranchBoundSolver::new().solve(&builder.build(), &SolverConfig::default())
    }

    fn shift_of(solution: &CpSolution, cfg: &RosterConfig, e: usize, d: usize) -> String {
        for s in 0..cfg.shift_set.len() {
            if solution.bool_value(&assignment_var(e, d, s)).unwrap() {
                return cfg.shift_set.name(s).to_string();
            }
        }
        panic!("no shift assigned for employee {e} day {d}");
    }

    #[test]
    fn test_hard_staffing_exact_headcount() {
        let emps = floor_employees(3);
        let cfg = config(2, &["day", "rest"]);
        let solution = solve(&emps, &cfg, &[Rule::staffing_hard("1F", "day", 2)]);

        assert_eq!(solution.status, SolverStatus::Optimal);
        for d in 0..2 {
            let on_day = (0..3)
                .filter(|&e| shift_of(&solution, &cfg, e, d) == "day")
                .count();
            assert_eq!(on_day, 2);
        }
    }

    #[test]
    fn test_soft_staffing_shortage_penalized() {
        // One employee cannot cover a target of two: shortage 1 per day.
        let emps = floor_employees(1);
        let cfg = config(2, &["day", "rest"]);
        let solution = solve(&emps, &cfg, &[Rule::staffing_soft("1F", "day", 2, 10, 1)]);

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(20));
    }

    #[test]
    fn test_soft_staffing_zero_weight_direction_free() {
        // Excess unpenalized: overstaffing the target costs nothing,
        // but the shortage side still binds through the equality.
        let emps = floor_employees(2);
        let cfg = config(1, &["day", "rest"]);
        let solution = solve(&emps, &cfg, &[Rule::staffing_soft("1F", "day", 1, 5, 0)]);

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(0));
    }

    #[test]
    fn test_min_holidays_hard() {
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[Rule::min_holidays_hard(EmploymentType::FullTime, 3)],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        let rests = (0..5)
            .filter(|&d| shift_of(&solution, &cfg, 0, d) == "rest")
            .count();
        assert!(rests >= 3);
    }

    #[test]
    fn test_min_holidays_soft_shortfall() {
        // Working all five days is forced; the holiday preference is
        // soft and pays its full shortfall.
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::total_workdays("E00", 5, WorkdayMode::Exact, 0),
                Rule::min_holidays_soft(EmploymentType::FullTime, 2, 7),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(14));
    }

    #[test]
    fn test_max_consecutive_hard_window() {
        // Five days, exactly four workdays, at most two consecutive:
        // the only patterns split the work around a mid-week rest.
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::total_workdays("E00", 4, WorkdayMode::Exact, 0),
                Rule::max_consecutive_hard(2, vec!["day".into()]),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        let pattern: Vec<String> = (0..5).map(|d| shift_of(&solution, &cfg, 0, d)).collect();
        assert_eq!(pattern.iter().filter(|s| *s == "day").count(), 4);
        for window in pattern.windows(3) {
            assert!(
                window.iter().any(|s| s == "rest"),
                "three consecutive workdays in {pattern:?}"
            );
        }
    }

    #[test]
    fn test_max_consecutive_duplicate_shift_names() {
        // A repeated working-shift name counts each slot once, so the
        // cap behaves exactly as with the name listed a single time.
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::total_workdays("E00", 3, WorkdayMode::Exact, 0),
                Rule::max_consecutive_hard(2, vec!["day".into(), "day".into()]),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        let pattern: Vec<String> = (0..5).map(|d| shift_of(&solution, &cfg, 0, d)).collect();
        assert_eq!(pattern.iter().filter(|s| *s == "day").count(), 3);
        for window in pattern.windows(3) {
            assert!(window.iter().any(|s| s == "rest"));
        }
    }

    #[test]
    fn test_max_consecutive_infeasible() {
        // Five workdays in five days cannot respect a two-day cap.
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::total_workdays("E00", 5, WorkdayMode::Exact, 0),
                Rule::max_consecutive_hard(2, vec!["day".into()]),
            ],
        );
        assert_eq!(solution.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_sequential_hard() {
        let emps = floor_employees(1);
        let cfg = config(3, &["day", "night", "post-night", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::request_hard("E00", date(14), "night"),
                Rule::sequential_hard("night", "post-night"),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(shift_of(&solution, &cfg, 0, 0), "night");
        assert_eq!(shift_of(&solution, &cfg, 0, 1), "post-night");
    }

    #[test]
    fn test_sequential_soft_violation_costed() {
        // Night on day 0 but day shift forced on day 1: the pairing is
        // broken and pays its weight.
        let emps = floor_employees(1);
        let cfg = config(2, &["day", "night", "post-night", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::request_hard("E00", date(14), "night"),
                Rule::request_hard("E00", date(15), "day"),
                Rule::sequential_soft("night", "post-night", 9),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(9));
    }

    #[test]
    fn test_balance_soft_even_split() {
        // Four day slots across two full-timers balance to 2/2.
        let emps = floor_employees(2);
        let cfg = config(4, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::staffing_hard("1F", "day", 1),
                Rule::balance_soft(EmploymentType::FullTime, "day", 3),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(0));
        let counts: Vec<usize> = (0..2)
            .map(|e| {
                (0..4)
                    .filter(|&d| shift_of(&solution, &cfg, e, d) == "day")
                    .count()
            })
            .collect();
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn test_balance_soft_forced_spread_costed() {
        // Requests pin three of three day slots on one employee; the
        // spread of 3 pays 3 * weight.
        let emps = floor_employees(2);
        let cfg = config(3, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::staffing_hard("1F", "day", 1),
                Rule::request_hard("E00", date(14), "day"),
                Rule::request_hard("E00", date(15), "day"),
                Rule::request_hard("E00", date(16), "day"),
                Rule::balance_soft(EmploymentType::FullTime, "day", 2),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(6));
    }

    #[test]
    fn test_balance_hard_gap() {
        let emps = floor_employees(2);
        let cfg = config(4, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::staffing_hard("1F", "day", 1),
                Rule::balance_hard(EmploymentType::FullTime, "day", 0),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        let count = |e: usize| {
            (0..4)
                .filter(|&d| shift_of(&solution, &cfg, e, d) == "day")
                .count()
        };
        assert_eq!(count(0), count(1));
    }

    #[test]
    fn test_request_soft_unmet_costed() {
        // The only floor employee must cover the day target, so the
        // rest request goes unmet and pays its weight.
        let emps = floor_employees(1);
        let cfg = config(1, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::staffing_hard("1F", "day", 1),
                Rule::request_soft("E00", date(14), "rest", 4),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(4));
    }

    #[test]
    fn test_avoid_pair_blocks_coassignment() {
        let emps = floor_employees(2);
        let cfg = config(2, &["night", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[Rule::avoid_same_shift("E00", "E01", vec!["night".into()])],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        for d in 0..2 {
            let both_night = (0..2).all(|e| shift_of(&solution, &cfg, e, d) == "night");
            assert!(!both_night);
        }
    }

    #[test]
    fn test_avoid_pair_conflict_infeasible() {
        // Both employees required on night, but the pair may not share it.
        let emps = floor_employees(2);
        let cfg = config(1, &["night", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::staffing_hard("1F", "night", 2),
                Rule::avoid_same_shift("E00", "E01", vec!["night".into()]),
            ],
        );
        assert_eq!(solution.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_total_workdays_soft_exact_two_sided() {
        // All five days forced to rest: actual 0 against target 2.
        let emps = floor_employees(1);
        let cfg = config(5, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                Rule::min_holidays_hard(EmploymentType::FullTime, 5),
                Rule::total_workdays("E00", 2, WorkdayMode::SoftExact, 3),
            ],
        );

        // Deviation 2 at weight 3.
        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(6));
    }

    #[test]
    fn test_weekend_rest_hard() {
        // 2025-04-18 Fri .. 2025-04-20 Sun: two designated days off.
        let shift_set = ShiftSet::new(vec!["day".into(), "rest".into()], "rest").unwrap();
        let horizon = Horizon::new(date(18), date(20)).unwrap();
        let cfg = RosterConfig::new(shift_set, horizon);
        let emps = floor_employees(1);
        let solution = solve(&emps, &cfg, &[Rule::weekend_rest_hard()]);

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(shift_of(&solution, &cfg, 0, 1), "rest"); // Saturday
        assert_eq!(shift_of(&solution, &cfg, 0, 2), "rest"); // Sunday
    }

    #[test]
    fn test_weekend_rest_holiday_list() {
        // A weekday named in the holiday list is designated off too.
        let shift_set = ShiftSet::new(vec!["day".into(), "rest".into()], "rest").unwrap();
        let horizon = Horizon::new(date(14), date(16)).unwrap();
        let cfg = RosterConfig::new(shift_set, horizon).with_holidays([date(15)]);
        let emps = floor_employees(1);
        let solution = solve(&emps, &cfg, &[Rule::weekend_rest_hard()]);

        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(shift_of(&solution, &cfg, 0, 1), "rest");
    }

    #[test]
    fn test_forced_leave_dominates_soft_rules() {
        let mut emps = floor_employees(2);
        emps[1] = emps[1].clone().with_status(EmployeeStatus::MaternityLeave);
        let cfg = config(3, &["day", "rest"]);
        let solution = solve(
            &emps,
            &cfg,
            &[
                // A heavy soft preference for the on-leave employee to work.
                Rule::staffing_soft("1F", "day", 2, 100, 0),
                Rule::forced_leave(vec![EmployeeStatus::MaternityLeave]),
            ],
        );

        assert_eq!(solution.status, SolverStatus::Optimal);
        for d in 0..3 {
            assert_eq!(shift_of(&solution, &cfg, 1, d), "rest");
        }
        // One unavoidable shortage per day.
        assert_eq!(solution.objective_value, Some(300));
    }

    #[test]
    fn test_forced_leave_without_match_skipped() {
        // Nobody on medical leave: nothing to constrain, so the rule is
        // skipped rather than counted as applied.
        let emps = floor_employees(2);
        let cfg = config(2, &["day", "rest"]);
        let mut builder = ShiftModelBuilder::new(&emps, &cfg);
        assert!(!builder.apply_rule(&Rule::forced_leave(vec![EmployeeStatus::MedicalLeave])));
        assert_eq!(builder.skipped_count(), 1);
        assert_eq!(builder.applied_count(), 0);
    }

    #[test]
    fn test_skip_unknown_employee() {
        let emps = floor_employees(1);
        let cfg = config(2, &["day", "rest"]);
        let mut builder = ShiftModelBuilder::new(&emps, &cfg);
        assert!(!builder.apply_rule(&Rule::request_hard("E99", date(14), "day")));
        assert!(!builder.apply_rule(&Rule::total_workdays("E99", 1, WorkdayMode::Max, 0)));
        assert_eq!(builder.skipped_count(), 2);
    }

    #[test]
    fn test_skip_unknown_floor_and_date() {
        let emps = floor_employees(1);
        let cfg = config(2, &["day", "rest"]);
        let mut builder = ShiftModelBuilder::new(&emps, &cfg);
        assert!(!builder.apply_rule(&Rule::staffing_hard("9F", "day", 1)));
        assert!(!builder.apply_rule(&Rule::request_hard("E00", date(30), "day")));
        assert_eq!(builder.skipped_count(), 2);
    }

    #[test]
    fn test_skip_degenerate_configs() {
        let emps = floor_employees(2);
        let cfg = config(2, &["day", "rest"]);
        let mut builder = ShiftModelBuilder::new(&emps, &cfg);
        // Non-positive bounds.
        assert!(!builder.apply_rule(&Rule::min_holidays_hard(EmploymentType::FullTime, 0)));
        assert!(!builder.apply_rule(&Rule::max_consecutive_hard(0, vec!["day".into()])));
        // Negative weight.
        assert!(!builder.apply_rule(&Rule::request_soft("E00", date(14), "day", -1)));
        // Same employee twice.
        assert!(!builder.apply_rule(&Rule::avoid_same_shift("E00", "E00", vec!["day".into()])));
        // Empty lists.
        assert!(!builder.apply_rule(&Rule::forced_leave(vec![])));
        assert!(!builder.apply_rule(&Rule::weekend_rest_soft(Some(vec![]), 1)));
        // Cohort of one cannot balance.
        assert!(!builder.apply_rule(&Rule::balance_soft(EmploymentType::PartTime, "day", 1)));
        assert_eq!(builder.skipped_count(), 7);
        assert_eq!(builder.applied_count(), 0);

        // The model is untouched and still valid.
        assert!(builder.build().validate().is_ok());
    }
}
