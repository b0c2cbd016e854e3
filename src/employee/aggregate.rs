//! In-memory filtering and aggregation over an employee list.
//!
//! # Design Decisions
//! - Pure functions over slices; no I/O, so they are tested directly
//! - Case-sensitive matching throughout
//! - Employees without a parsed salary are left out of salary aggregates
//! - Ranking uses a stable sort: equal salaries keep upstream order

use crate::employee::types::Employee;

/// Number of names returned by the top earners ranking.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `term`. An empty term matches everyone.
pub fn search_by_name(employees: Vec<Employee>, term: &str) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|e| e.name.contains(term))
        .collect()
}

/// First employee whose name equals `name` exactly.
pub fn find_by_name<'a>(employees: &'a [Employee], name: &str) -> Option<&'a Employee> {
    employees.iter().find(|e| e.name == name)
}

/// Highest parsed salary, or `None` when no employee has one.
pub fn highest_salary(employees: &[Employee]) -> Option<i64> {
    employees.iter().filter_map(|e| e.salary).max()
}

/// Names of the `limit` best paid employees, highest salary first.
pub fn top_earner_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut ranked: Vec<(&Employee, i64)> = employees
        .iter()
        .filter_map(|e| e.salary.map(|s| (e, s)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(e, _)| e.name.clone())
        .collect()
}

/// Number of records left out of salary aggregates.
pub fn unsalaried_count(employees: &[Employee]) -> usize {
    employees.iter().filter(|e| e.salary.is_none()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, salary: Option<i64>) -> Employee {
        Employee {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            salary,
            age: 30,
            title: "Engineer".to_string(),
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
        }
    }

    #[test]
    fn test_two_employee_scenario() {
        let staff = vec![
            employee("John Doe", Some(90_000)),
            employee("Jane Smith", Some(120_000)),
        ];
        assert_eq!(highest_salary(&staff), Some(120_000));
        assert_eq!(
            top_earner_names(&staff, TOP_EARNERS_LIMIT),
            vec!["Jane Smith".to_string(), "John Doe".to_string()]
        );
    }

    #[test]
    fn test_highest_salary_empty_and_unsalaried() {
        assert_eq!(highest_salary(&[]), None);
        let staff = vec![employee("No Pay", None), employee("Also None", None)];
        assert_eq!(highest_salary(&staff), None);
        assert_eq!(unsalaried_count(&staff), 2);
    }

    #[test]
    fn test_highest_salary_skips_unparsed() {
        let staff = vec![
            employee("A", Some(10)),
            employee("B", None),
            employee("C", Some(30)),
        ];
        assert_eq!(highest_salary(&staff), Some(30));
    }

    #[test]
    fn test_top_earners_limited_and_sorted() {
        let staff: Vec<Employee> = (1..=15)
            .map(|i| employee(&format!("Employee {}", i), Some(i * 1_000)))
            .collect();

        let names = top_earner_names(&staff, TOP_EARNERS_LIMIT);
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Employee 15");
        assert_eq!(names[9], "Employee 6");

        let all: Vec<&str> = staff.iter().map(|e| e.name.as_str()).collect();
        assert!(names.iter().all(|n| all.contains(&n.as_str())));
    }

    #[test]
    fn test_top_earners_ties_keep_upstream_order() {
        let staff = vec![
            employee("First", Some(500)),
            employee("Unpaid", None),
            employee("Second", Some(500)),
            employee("Top", Some(900)),
        ];
        assert_eq!(
            top_earner_names(&staff, TOP_EARNERS_LIMIT),
            vec!["Top", "First", "Second"]
        );
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let staff = vec![
            employee("John Doe", Some(1)),
            employee("Johnny Cash", Some(2)),
            employee("jane john", Some(3)),
        ];
        let found: Vec<String> = search_by_name(staff.clone(), "John")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(found, vec!["John Doe", "Johnny Cash"]);

        assert_eq!(search_by_name(staff.clone(), "").len(), 3);
        assert!(search_by_name(staff, "Nobody").is_empty());
    }

    #[test]
    fn test_find_by_name_exact_match_only() {
        let staff = vec![employee("John Doe", Some(1))];
        assert!(find_by_name(&staff, "John Doe").is_some());
        assert!(find_by_name(&staff, "john doe").is_none());
        assert!(find_by_name(&staff, "John").is_none());
    }
}
