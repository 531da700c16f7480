use crate::application::dto::{
    CollectDependenciesRequest, CollectDependenciesResponse, CollectedModule, DependencySource,
};
use crate::build_info::domain::{Checksum, Dependency, Partial, PartialPayload};
use crate::build_info::services::{GraphBuilder, RawPackage, RequestedByPropagator};
use crate::ports::outbound::{ChecksumResolver, PartialStore, ProgressReporter};
use crate::shared::Result;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// CollectDependenciesUseCase - Turns tool output into dependency fragments
///
/// Orchestrates the dependency workflow:
/// 1. parse the tool output into raw packages and roots
/// 2. resolve missing checksums concurrently through the resolver port
/// 3. build the dependency graph of each root
/// 4. propagate requested-by paths from the root
/// 5. record one dependencies fragment per root module
///
/// # Type Parameters
/// * `S` - PartialStore implementation
/// * `R` - ChecksumResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectDependenciesUseCase<S, R, PR> {
    store: S,
    resolver: R,
    progress_reporter: PR,
}

impl<S, R, PR> CollectDependenciesUseCase<S, R, PR>
where
    S: PartialStore,
    R: ChecksumResolver,
    PR: ProgressReporter,
{
    pub fn new(store: S, resolver: R, progress_reporter: PR) -> Self {
        Self {
            store,
            resolver,
            progress_reporter,
        }
    }

    pub async fn execute(
        &self,
        request: CollectDependenciesRequest,
    ) -> Result<CollectDependenciesResponse> {
        let (roots, mut packages) = Self::read_source(&request.source)?;
        if roots.is_empty() {
            anyhow::bail!("No root module found in the dependency input");
        }

        self.progress_reporter.report(&format!(
            "📖 Read {} package(s) under {} root module(s)",
            packages.len(),
            roots.len()
        ));

        let unresolved = self
            .resolve_checksums(&mut packages, &roots, request.checksum_workers)
            .await?;
        if unresolved > 0 {
            let consequence = if request.require_checksums {
                "left out of the build info"
            } else {
                "recorded without a checksum"
            };
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} package(s) not found in the package cache were {}",
                unresolved, consequence
            ));
        }

        let builder = GraphBuilder::new().require_checksums(request.require_checksums);
        let propagator = RequestedByPropagator::new(
            request.max_path_length,
            request.max_paths_per_dependency,
        );

        let mut response = CollectDependenciesResponse {
            unresolved_checksums: unresolved,
            ..Default::default()
        };

        let single_root = roots.len() == 1;
        for root_id in &roots {
            let graph = builder.build(root_id, &packages)?;
            debug!(
                root = %root_id,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                dangling = graph.dangling_edge_count(),
                "Built dependency graph"
            );

            let (root_id, adjacency, nodes) = graph.into_parts();
            let propagation = propagator.propagate(&Dependency::root(root_id.clone()), nodes, &adjacency);
            response.looped.extend(propagation.looped.iter().cloned());
            response.truncated_paths += propagation.truncated;

            // Nodes of other roots share the package list but are not reachable.
            let dependencies: Vec<Dependency> = propagation
                .into_sorted_dependencies()
                .into_iter()
                .filter(|dependency| !dependency.requested_by.is_empty())
                .collect();

            let module_id = if single_root && !request.record.module_id.is_empty() {
                request.record.module_id.clone()
            } else {
                root_id
            };

            let dependency_count = dependencies.len();
            let partial = Partial::new(
                module_id.clone(),
                request.record.module_type,
                request.record.timestamp,
                PartialPayload::Dependencies(dependencies),
            );
            let fragment_path = self
                .store
                .save_partial(&request.record.coordinates, &partial)?;

            info!(module = %module_id, dependencies = dependency_count, "Collected dependencies");
            response.modules.push(CollectedModule {
                module_id,
                dependency_count,
                fragment_path,
            });
        }

        if !response.looped.is_empty() {
            self.progress_reporter.report(&format!(
                "🔁 {} dependency(ies) are part of a cycle",
                response.looped.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Recorded dependencies of {} module(s) for {}",
            response.modules.len(),
            request.record.coordinates
        ));

        Ok(response)
    }

    /// Parses the tool output into root ids and raw packages
    fn read_source(source: &DependencySource) -> Result<(Vec<String>, Vec<RawPackage>)> {
        match source {
            DependencySource::Packages { root_id, packages } => {
                Ok((vec![root_id.clone()], packages.clone()))
            }
            DependencySource::CargoTree(text) => {
                let tree = GraphBuilder::parse_cargo_tree(text)?;
                Ok((tree.roots, tree.packages))
            }
        }
    }

    /// Fills in missing checksums, returning how many stayed unresolved
    ///
    /// Root packages are modules, not dependencies, and are never resolved.
    /// Resolutions run with at most `workers` in flight; each finished one
    /// lands in a shared map that is applied to `packages` once all are done.
    async fn resolve_checksums(
        &self,
        packages: &mut [RawPackage],
        roots: &[String],
        workers: usize,
    ) -> Result<usize> {
        let mut pending = Vec::new();
        for (index, package) in packages.iter().enumerate() {
            if package.checksum.is_some() {
                continue;
            }
            let id = package.id()?.into_string();
            if !roots.contains(&id) {
                pending.push((index, package.name.clone(), package.version.clone()));
            }
        }

        if pending.is_empty() {
            return Ok(0);
        }

        let total = pending.len();
        self.progress_reporter.report(&format!(
            "🔍 Resolving checksums of {} package(s)...",
            total
        ));

        let resolved: DashMap<usize, Checksum> = DashMap::new();
        {
            let resolver = &self.resolver;
            let resolved = &resolved;
            let mut resolutions = stream::iter(pending)
                .map(|(index, name, version)| async move {
                    if let Some(checksum) = resolver.resolve(&name, &version).await? {
                        resolved.insert(index, checksum);
                    }
                    Ok::<(), anyhow::Error>(())
                })
                .buffer_unordered(workers.max(1));

            let mut finished = 0;
            while let Some(result) = resolutions.next().await {
                result?;
                finished += 1;
                self.progress_reporter
                    .report_progress(finished, total, Some("Resolving checksums"));
            }
        }

        let unresolved = total - resolved.len();
        for (index, checksum) in resolved {
            packages[index].checksum = Some(checksum);
        }
        Ok(unresolved)
    }
}
