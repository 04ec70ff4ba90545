/**
 * Explicit task graph for the rendering pipeline.
 *
 * The graph has two node kinds: an array node is an indexed family of
 * independent units of work (one frame per index), and a fan-in node runs
 * only after every instance of the array node it depends on has succeeded.
 * Nodes carry advisory resource hints; the executor backend is selected by
 * name at run time.
 */
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type UnitOfWorkError = Box<dyn std::error::Error + Send + Sync>;
pub type UnitOfWorkResult = Result<(), UnitOfWorkError>;

/**
 * Advisory per-node resource hints, mirrored from the parameter file. The
 * local backends only honor `cpus`; the others are carried so that a cluster
 * backend has what it needs to build a submission.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ResourceHints {
    pub cpus: usize,
    pub ram_mb: u64,
    pub wall_time_s: u64,
}

impl Default for ResourceHints {
    fn default() -> Self {
        ResourceHints {
            cpus: 1,
            ram_mb: 1024,
            wall_time_s: 300,
        }
    }
}

/// Executor backend, selected by name in the parameter file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutorBackend {
    /// Runs array instances on a rayon thread pool sized by the node's cpu hint.
    Local,
    /// Runs every instance on the calling thread, in index order.
    Serial,
}

/// An indexed family of independent units of work.
pub struct ArrayNode<'a> {
    pub name: String,
    pub count: usize,
    pub hints: ResourceHints,
    pub work: Box<dyn Fn(usize) -> UnitOfWorkResult + Send + Sync + 'a>,
}

/// A single unit of work gated on the completion of all instances of the
/// array node named by `depends_on`.
pub struct FanInNode<'a> {
    pub name: String,
    pub depends_on: String,
    pub hints: ResourceHints,
    pub work: Box<dyn Fn() -> UnitOfWorkResult + Send + Sync + 'a>,
}

#[derive(Default)]
pub struct TaskGraph<'a> {
    arrays: Vec<ArrayNode<'a>>,
    fan_ins: Vec<FanInNode<'a>>,
}

impl<'a> TaskGraph<'a> {
    pub fn new() -> TaskGraph<'a> {
        TaskGraph {
            arrays: Vec::new(),
            fan_ins: Vec::new(),
        }
    }

    pub fn add_array(&mut self, node: ArrayNode<'a>) {
        self.arrays.push(node);
    }

    pub fn add_fan_in(&mut self, node: FanInNode<'a>) {
        self.fan_ins.push(node);
    }

    /**
     * Walks the graph: every array node first, then each fan-in node whose
     * upstream array completed in full. A failed array instance aborts only
     * its own unit of work; the remaining instances still run, the dependent
     * fan-in node is starved, and the walk reports the failure.
     */
    pub fn run(&self, backend: ExecutorBackend) -> UnitOfWorkResult {
        for node in &self.fan_ins {
            if !self.arrays.iter().any(|array| array.name == node.depends_on) {
                return Err(format!(
                    "fan-in node `{}` depends on unknown array node `{}`",
                    node.name, node.depends_on
                )
                .into());
            }
        }

        let mut completed: BTreeSet<&str> = BTreeSet::new();
        let mut first_failure: Option<UnitOfWorkError> = None;

        for node in &self.arrays {
            println!(
                "INFO:  Running array node `{}`: {} instances ({:?}, cpus: {})",
                node.name, node.count, backend, node.hints.cpus
            );
            match run_array_node(node, backend) {
                Ok(()) => {
                    completed.insert(node.name.as_str());
                }
                Err(error) => {
                    eprintln!("ERROR:  Array node `{}` failed: {}", node.name, error);
                    if first_failure.is_none() {
                        first_failure = Some(error);
                    }
                }
            }
        }

        for node in &self.fan_ins {
            if !completed.contains(node.depends_on.as_str()) {
                return Err(format!(
                    "fan-in node `{}` starved: upstream array node `{}` did not complete",
                    node.name, node.depends_on
                )
                .into());
            }
            println!("INFO:  Running fan-in node `{}`", node.name);
            (node.work)()?;
            completed.insert(node.name.as_str());
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn run_array_node(node: &ArrayNode, backend: ExecutorBackend) -> UnitOfWorkResult {
    let failures: Vec<(usize, String)> = match backend {
        ExecutorBackend::Serial => (0..node.count)
            .filter_map(|index| {
                (node.work)(index)
                    .err()
                    .map(|error| (index, error.to_string()))
            })
            .collect(),
        ExecutorBackend::Local => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(node.hints.cpus)
                .build()?;
            pool.install(|| {
                (0..node.count)
                    .into_par_iter()
                    .filter_map(|index| {
                        (node.work)(index)
                            .err()
                            .map(|error| (index, error.to_string()))
                    })
                    .collect()
            })
        }
    };

    if failures.is_empty() {
        Ok(())
    } else {
        let (first_index, first_error) = &failures[0];
        Err(format!(
            "{} of {} instances failed; first failure at index {}: {}",
            failures.len(),
            node.count,
            first_index,
            first_error
        )
        .into())
    }
}
