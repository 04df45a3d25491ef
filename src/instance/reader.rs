//! Reader for the `.dat` instance format.
//!
//! ```text
//! Name:		mggdb_0.25_1
//! Optimal value:	-1
//! Capacity:	5
//! Depot Node:	1
//! #Nodes:		12
//! ...
//! ReN.	DEMAND	S. COST
//! N2	1	1
//! ReE.	From N.	To N.	T. COST	DEMAND	S. COST
//! E1	1	2	13	1	13
//! EDGE	FROM N.	TO N.	T. COST
//! NrE1	2	4	17
//! ReA.	FROM N.	TO N.	T. COST	DEMAND	S. COST
//! A1	3	5	6	1	6
//! ARC	FROM N.	TO N.	T. COST
//! NrA1	5	7	2
//! ```

use std::fs;
use std::path::Path;

use crate::error::{CarpError, Result};

use super::{Instance, RequiredLink, RequiredNode};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    RequiredNodes,
    RequiredEdges,
    Edges,
    RequiredArcs,
    Arcs,
}

impl Section {
    fn from_line(line: &str) -> Option<Self> {
        if line.starts_with("ReN.") {
            Some(Self::RequiredNodes)
        } else if line.starts_with("ReE.") {
            Some(Self::RequiredEdges)
        } else if line.starts_with("EDGE") {
            Some(Self::Edges)
        } else if line.starts_with("ReA.") {
            Some(Self::RequiredArcs)
        } else if line.starts_with("ARC") {
            Some(Self::Arcs)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    optimal_value: Option<i64>,
    capacity: Option<i32>,
    depot: Option<usize>,
    depot_line: usize,
    nodes: Option<usize>,
    nodes_line: usize,
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parses instance text.
///
/// Data rows that cannot be interpreted, including rows naming a vertex
/// outside `1..=#Nodes`, are skipped with a warning. A missing `Capacity:`
/// or `Depot Node:` header, an unreadable header value, or a depot outside
/// `1..=#Nodes` is an error.
///
/// # Examples
///
/// ```
/// use u_carp::instance::parse_instance;
///
/// let text = "\
/// Capacity:\t10
/// Depot Node:\t1
/// ReN.\tDEMAND\tS. COST
/// N3\t2\t1
/// ReE.\tFrom N.\tTo N.\tT. COST\tDEMAND\tS. COST
/// E1\t1\t2\t4\t3\t4
/// EDGE\tFROM N.\tTO N.\tT. COST
/// NrE1\t2\t3\t1
/// ";
/// let inst = parse_instance(text).unwrap();
/// assert_eq!(inst.capacity, 10);
/// assert_eq!(inst.depot, 1);
/// assert_eq!(inst.tasks().len(), 2);
/// assert_eq!(inst.network.edges().len(), 2);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut header = Header::default();
    let mut section: Option<Section> = None;
    let mut rows: Vec<(usize, Section, &str)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if let Some((key, value)) = line.split_once(':') {
            if read_header(&mut header, key.trim(), value.trim(), line_no)? {
                continue;
            }
        }

        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("Name:")
            || line.to_lowercase().contains("based on the")
        {
            continue;
        }

        if let Some(next) = Section::from_line(line) {
            section = Some(next);
            continue;
        }

        if let Some(current) = section {
            rows.push((line_no, current, line));
        }
    }

    let capacity = header.capacity.ok_or(CarpError::MissingHeader("Capacity"))?;
    let depot = header.depot.ok_or(CarpError::MissingHeader("Depot Node"))?;

    if let Some(n) = header.nodes {
        if n.checked_mul(n).is_none() {
            return Err(CarpError::parse(
                header.nodes_line,
                format!("{n} nodes cannot index a distance matrix"),
            ));
        }
        check_vertex(depot, Some(n), header.depot_line)?;
    }

    let mut instance = Instance::new(capacity, depot);
    instance.name = header.name;
    instance.optimal_value = header.optimal_value;
    if let Some(n) = header.nodes {
        for v in 1..=n {
            instance.network.add_vertex(v);
        }
    }

    for (line_no, section, line) in rows {
        if let Err(err) = read_row(&mut instance, section, line, line_no, header.nodes) {
            log::warn!("skipping instance row: {err}");
        }
    }

    log::debug!(
        "instance parsed: capacity={} depot={} required_nodes={} required_edges={} required_arcs={}",
        instance.capacity,
        instance.depot,
        instance.required_nodes.len(),
        instance.required_edges.len(),
        instance.required_arcs.len()
    );
    Ok(instance)
}

/// Returns `Ok(true)` if the line was a recognised header.
fn read_header(header: &mut Header, key: &str, value: &str, line_no: usize) -> Result<bool> {
    match key {
        "Name" => header.name = Some(value.to_string()),
        "Optimal value" => header.optimal_value = Some(parse_number(value, line_no)?),
        "Capacity" => header.capacity = Some(parse_number(value, line_no)?),
        "Depot Node" => {
            header.depot = Some(parse_number(value, line_no)?);
            header.depot_line = line_no;
        }
        "#Nodes" => {
            header.nodes = Some(parse_number(value, line_no)?);
            header.nodes_line = line_no;
        }
        "#Edges" | "#Arcs" | "#Required N" | "#Required E" | "#Required A" => {}
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_row(
    instance: &mut Instance,
    section: Section,
    line: &str,
    line_no: usize,
    nodes: Option<usize>,
) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let field = |i: usize| column(&parts, i, line_no);
    let vertex = |value: &str| {
        parse_number(value, line_no).and_then(|v| check_vertex(v, nodes, line_no))
    };

    match section {
        Section::RequiredNodes => {
            let vertex = vertex(field(0)?.trim_start_matches('N'))?;
            let demand = parse_number(field(1)?, line_no)?;
            let service_cost = parse_number::<i64>(field(2)?, line_no)? as f64;
            instance.network.add_vertex(vertex);
            instance.required_nodes.push(RequiredNode {
                vertex,
                demand,
                service_cost,
            });
        }
        Section::RequiredEdges | Section::Edges | Section::RequiredArcs | Section::Arcs => {
            let from = vertex(field(1)?)?;
            let to = vertex(field(2)?)?;
            let transport_cost = parse_number::<i64>(field(3)?, line_no)? as f64;

            let required = match section {
                Section::RequiredEdges | Section::RequiredArcs => Some((
                    parse_number(field(4)?, line_no)?,
                    parse_number::<i64>(field(5)?, line_no)? as f64,
                )),
                _ => None,
            };

            let directed = matches!(section, Section::RequiredArcs | Section::Arcs);
            if directed {
                instance.network.add_arc(from, to, transport_cost);
            } else {
                instance.network.add_edge(from, to, transport_cost);
            }

            if let Some((demand, service_cost)) = required {
                let link = RequiredLink {
                    from,
                    to,
                    transport_cost,
                    demand,
                    service_cost,
                };
                if directed {
                    instance.required_arcs.push(link);
                } else {
                    instance.required_edges.push(link);
                }
            }
        }
    }
    Ok(())
}

/// Vertex ids are 1-based and bounded by `#Nodes` when the header gives it.
fn check_vertex(vertex: usize, nodes: Option<usize>, line_no: usize) -> Result<usize> {
    match nodes {
        Some(n) if vertex == 0 || vertex > n => Err(CarpError::parse(
            line_no,
            format!("vertex {vertex} outside 1..={n}"),
        )),
        _ => Ok(vertex),
    }
}

fn column<'a>(parts: &[&'a str], i: usize, line_no: usize) -> Result<&'a str> {
    parts
        .get(i)
        .copied()
        .ok_or_else(|| CarpError::parse(line_no, format!("missing column {}", i + 1)))
}

fn parse_number<T: std::str::FromStr>(value: &str, line_no: usize) -> Result<T> {
    value
        .parse()
        .map_err(|_| CarpError::parse(line_no, format!("invalid number '{value}'")))
}
