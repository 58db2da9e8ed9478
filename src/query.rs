// Ward Reports - Query Service
// Translates the optional filter parameters into a storage predicate.

use anyhow::Result;
use rusqlite::{params_from_iter, Connection};

use crate::db::{map_report_row, Report};

/// Optional substring filters accepted by the list operation.
///
/// Named filters AND together. `search` is a single OR-group matched
/// against customer name, hospital name, ward name, grade, and shift
/// time; when both are present the OR-group is AND'd with the named
/// filters. An empty string counts as provided and matches every record,
/// since the empty string is a substring of everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub customer_name: Option<String>,
    pub hospital_name: Option<String>,
    pub ward_name: Option<String>,
    pub search: Option<String>,
}

/// Return the reports matching the filter, in storage order.
pub fn find_reports(conn: &Connection, filter: &ReportFilter) -> Result<Vec<Report>> {
    let mut sql = String::from(
        "SELECT id, customer_name, hospital_name, ward_name, grade, date, shift_time
         FROM reports",
    );
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(customer_name) = &filter.customer_name {
        clauses.push("customer_name LIKE '%' || ? || '%'");
        values.push(customer_name.clone());
    }

    if let Some(hospital_name) = &filter.hospital_name {
        clauses.push("hospital_name LIKE '%' || ? || '%'");
        values.push(hospital_name.clone());
    }

    if let Some(ward_name) = &filter.ward_name {
        clauses.push("ward_name LIKE '%' || ? || '%'");
        values.push(ward_name.clone());
    }

    if let Some(search) = &filter.search {
        clauses.push(
            "(customer_name LIKE '%' || ? || '%'
              OR hospital_name LIKE '%' || ? || '%'
              OR ward_name LIKE '%' || ? || '%'
              OR grade LIKE '%' || ? || '%'
              OR shift_time LIKE '%' || ? || '%')",
        );
        for _ in 0..5 {
            values.push(search.clone());
        }
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let mut stmt = conn.prepare(&sql)?;
    let reports = stmt
        .query_map(params_from_iter(values.iter()), map_report_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_report, Database, NewReport};
    use chrono::NaiveDate;

    fn seed(conn: &Connection) {
        let rows = [
            ("John Doe", "Hospital A", "Ward 1", "A", "08:00"),
            ("Jane Roe", "Hospital B", "Ward 2", "B", "16:00"),
            ("Alex Poe", "Clinic C", "Ward 1", "A", "08:00"),
        ];

        for (customer, hospital, ward, grade, shift) in rows {
            let report = NewReport {
                customer_name: customer.to_string(),
                hospital_name: hospital.to_string(),
                ward_name: ward.to_string(),
                grade: grade.to_string(),
                date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                shift_time: shift.to_string(),
            };
            insert_report(conn, &report).unwrap();
        }
    }

    #[test]
    fn test_no_filter_returns_all() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        let reports = find_reports(&conn, &ReportFilter::default()).unwrap();

        assert_eq!(reports.len(), 3);
    }

    #[test]
    fn test_named_filter_matches_substring() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        let filter = ReportFilter {
            customer_name: Some("Doe".to_string()),
            ..Default::default()
        };
        let reports = find_reports(&conn, &filter).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].customer_name, "John Doe");
    }

    #[test]
    fn test_named_filters_combine_with_and() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        // "Ward 1" alone matches two rows; AND'ing the hospital narrows to one
        let filter = ReportFilter {
            hospital_name: Some("Hospital A".to_string()),
            ward_name: Some("Ward 1".to_string()),
            ..Default::default()
        };
        let reports = find_reports(&conn, &filter).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].customer_name, "John Doe");
    }

    #[test]
    fn test_search_ors_across_fields() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        // "Hospital" appears in two hospital names and nowhere else
        let filter = ReportFilter {
            search: Some("Hospital".to_string()),
            ..Default::default()
        };
        assert_eq!(find_reports(&conn, &filter).unwrap().len(), 2);

        // "08:00" matches on shift time alone
        let filter = ReportFilter {
            search: Some("08:00".to_string()),
            ..Default::default()
        };
        assert_eq!(find_reports(&conn, &filter).unwrap().len(), 2);
    }

    #[test]
    fn test_search_ands_with_named_filters() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        let filter = ReportFilter {
            ward_name: Some("Ward 1".to_string()),
            search: Some("Hospital".to_string()),
            ..Default::default()
        };
        let reports = find_reports(&conn, &filter).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].customer_name, "John Doe");
    }

    #[test]
    fn test_empty_string_filter_matches_everything() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        let filter = ReportFilter {
            customer_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(find_reports(&conn, &filter).unwrap().len(), 3);

        let filter = ReportFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(find_reports(&conn, &filter).unwrap().len(), 3);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        seed(&conn);

        let filter = ReportFilter {
            customer_name: Some("Nobody".to_string()),
            ..Default::default()
        };
        assert!(find_reports(&conn, &filter).unwrap().is_empty());
    }
}
