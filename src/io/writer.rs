//! Plain-text solution format.
//!
//! ```text
//! <total cost, rounded>
//! <number of routes>
//! <run id>
//! <unix timestamp>
//!  0 1 <route> <demand> <cost>  <visits + 2> (D 0,1,1) (S <task>,<u>,<v>) ... (D 0,1,1)
//! ```
//!
//! Visits are found by walking consecutive stop pairs `(u, v)` of a route:
//! an arc task matches `(origin, destination)` exactly, an edge task matches
//! either direction, and a node task matches the first step leaving its
//! vertex. Each task is listed once; tasks the walk never meets are listed
//! after the walked ones with their own endpoints.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{Route, ServiceTask, Solution, TaskKind};

const DEPOT_MARKER: &str = "(D 0,1,1)";

fn visit_matches(task: &ServiceTask, u: usize, v: usize) -> bool {
    let (o, d) = (task.origin(), task.destination());
    match task.kind() {
        TaskKind::Arc => o == u && d == v,
        TaskKind::Edge => (o == u && d == v) || (o == v && d == u),
        TaskKind::Node => o == u,
    }
}

fn visit(task: &ServiceTask, u: usize, v: usize) -> String {
    match task.kind() {
        TaskKind::Node => format!("(S {},{},{})", task.id(), task.origin(), task.origin()),
        TaskKind::Edge | TaskKind::Arc => format!("(S {},{u},{v})", task.id()),
    }
}

/// Lists the visits of a route in service order.
fn route_visits(route: &Route) -> Vec<String> {
    let clients = route.clients();
    let mut listed = vec![false; clients.len()];
    let mut visits = Vec::with_capacity(clients.len());

    for step in route.stops().windows(2) {
        let (u, v) = (step[0], step[1]);
        for (idx, task) in clients.iter().enumerate() {
            if !listed[idx] && visit_matches(task, u, v) {
                listed[idx] = true;
                visits.push(visit(task, u, v));
            }
        }
    }

    for (idx, task) in clients.iter().enumerate() {
        if !listed[idx] {
            log::debug!("task {}{} not met along its route", task.kind(), task.id());
            visits.push(visit(task, task.origin(), task.destination()));
        }
    }
    visits
}

/// Writes a solution in the plain-text format.
///
/// # Arguments
///
/// * `writer` — Destination
/// * `solution` — Solution to serialize
/// * `distances` — Distance matrix the solution was built on
/// * `run_id` — Arbitrary run identifier
/// * `timestamp` — Seconds since the UNIX epoch
///
/// # Examples
///
/// ```
/// use u_carp::models::{Route, ServiceTask, Solution};
/// use u_carp::distance::DistanceMatrix;
/// use u_carp::io::write_solution;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let route = Route::singleton(ServiceTask::node(3, 1, 5, 1.0), 0);
/// let solution = Solution::evaluated(vec![route], &dm);
///
/// let mut out = Vec::new();
/// write_solution(&mut out, &solution, &dm, 12345678, 1700000000).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "3\n1\n12345678\n1700000000\n 0 1 1 5 3  3 (D 0,1,1) (S 3,1,1) (D 0,1,1)\n"
/// );
/// ```
pub fn write_solution<W: Write>(
    writer: &mut W,
    solution: &Solution,
    distances: &DistanceMatrix,
    run_id: u64,
    timestamp: u64,
) -> Result<()> {
    writeln!(writer, "{}", solution.total_cost().round() as i64)?;
    writeln!(writer, "{}", solution.num_routes())?;
    writeln!(writer, "{run_id}")?;
    writeln!(writer, "{timestamp}")?;

    for (i, route) in solution.routes().iter().enumerate() {
        let visits = route_visits(route);
        writeln!(
            writer,
            " 0 1 {} {} {}  {} {DEPOT_MARKER} {} {DEPOT_MARKER}",
            i + 1,
            route.demand(),
            route.cost(distances) as i64,
            visits.len() + 2,
            visits.join(" ")
        )?;
    }
    Ok(())
}

/// Writes a solution file, stamping it with a random run id and the
/// current time.
pub fn save_solution<P: AsRef<Path>>(
    path: P,
    solution: &Solution,
    distances: &DistanceMatrix,
) -> Result<()> {
    let run_id = rand::rng().random_range(10_000_000..=999_999_999u64);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_solution(&mut writer, solution, distances, run_id, timestamp)?;
    writer.flush()?;
    log::info!(
        "saved solution to {} (cost={:.3}, routes={})",
        path.as_ref().display(),
        solution.total_cost(),
        solution.num_routes()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_matrix(n: usize) -> DistanceMatrix {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = (i as f64 - j as f64).abs();
            }
        }
        DistanceMatrix::from_data(n, data).expect("square")
    }

    fn render(solution: &Solution, dm: &DistanceMatrix) -> String {
        let mut out = Vec::new();
        write_solution(&mut out, solution, dm, 12345678, 1700000000).expect("in-memory write");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_mixed_routes() {
        let dm = line_matrix(3);
        let node = Route::singleton(ServiceTask::node(1, 1, 4, 1.5), 0);
        let edge = Route::singleton(ServiceTask::edge(1, 1, 2, 3, 2.0), 0);
        let first = Route::merged(&node, &edge, vec![0, 1, 1, 1, 2, 0]);
        let second = Route::singleton(ServiceTask::arc(1, 2, 1, 2, 0.0), 0);
        let solution = Solution::evaluated(vec![first, second], &dm);

        let expected = concat!(
            "12\n2\n12345678\n1700000000\n",
            " 0 1 1 7 7  4 (D 0,1,1) (S 1,1,1) (S 1,1,2) (D 0,1,1)\n",
            " 0 1 2 2 4  3 (D 0,1,1) (S 1,2,1) (D 0,1,1)\n",
        );
        assert_eq!(render(&solution, &dm), expected);
    }

    #[test]
    fn test_edge_matches_either_direction() {
        let mut route = Route::singleton(ServiceTask::edge(4, 1, 2, 1, 0.0), 0);
        route.set_stops(vec![0, 2, 1, 0]);
        assert_eq!(route_visits(&route), vec!["(S 4,2,1)".to_string()]);
    }

    #[test]
    fn test_unmet_task_is_appended() {
        let mut route = Route::singleton(ServiceTask::arc(5, 1, 2, 1, 0.0), 0);
        route.set_stops(vec![0, 2, 1, 0]);
        assert_eq!(route_visits(&route), vec!["(S 5,1,2)".to_string()]);
    }

    #[test]
    fn test_empty_solution() {
        let dm = line_matrix(1);
        assert_eq!(
            render(&Solution::new(), &dm),
            "0\n0\n12345678\n1700000000\n"
        );
    }

    #[test]
    fn test_save_solution_writes_file() {
        let dm = line_matrix(2);
        let route = Route::singleton(ServiceTask::node(1, 1, 1, 0.0), 0);
        let solution = Solution::evaluated(vec![route], &dm);
        let path = std::env::temp_dir().join(format!("u-carp-{}.sol", std::process::id()));

        save_solution(&path, &solution, &dm).expect("writable temp dir");
        let text = std::fs::read_to_string(&path).expect("file exists");
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "2");
        let run_id: u64 = lines[2].parse().expect("numeric run id");
        assert!((10_000_000..=999_999_999).contains(&run_id));
        assert_eq!(lines[4], " 0 1 1 1 2  3 (D 0,1,1) (S 1,1,1) (D 0,1,1)");
    }
}
