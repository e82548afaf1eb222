use crate::input_files;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use libgraphql_prune::PruneOutcome;
use libgraphql_prune::QueryPruner;
use libgraphql_prune::ScopeTraceMiddleware;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct PruneCmd {
    #[arg(
        help="Path to a JSON file holding the cache snapshot to prune against.",
        long,
    )]
    cache: PathBuf,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Log every cache scope entered or left while pruning (visible \
             with `LOG_LEVEL=trace`).",
        long,
    )]
    trace_scopes: bool,

    #[arg(
        help="Path to a JSON file holding the variable values for the \
             queries.",
        long,
    )]
    variables: Option<PathBuf>,

    #[arg(
        help="Paths to one or more GraphQL query files or directories \
             containing GraphQL query files which need to be pruned.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl PruneCmd {
    fn find_query_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let graphql_file_exts: HashSet<String> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            // A file named explicitly is pruned regardless of its extension.
            if path.is_file() {
                file_paths.push(std::fs::canonicalize(path)?);
                continue;
            }

            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                let entry = entry?;
                let path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {path:#?}.");
                    continue;
                }

                if let Some(ext) = path.extension().map(|s| s.to_string_lossy())
                    && graphql_file_exts.contains(&*ext) {
                    log::trace!("Found query file at {path:#?}.");
                    file_paths.push(std::fs::canonicalize(path)?);
                }
            }
        }

        log::debug!("Found {} GraphQL files to be pruned.", file_paths.len());
        Ok(file_paths)
    }

    fn prune_file(
        &self,
        file_path: &Path,
        cache: &libgraphql_prune::CacheValue,
        variables: &libgraphql_prune::VariableBindings,
        scope_tracer: &mut ScopeTraceMiddleware,
    ) -> anyhow::Result<String> {
        let query = input_files::read_content(file_path)?;

        let mut pruner = QueryPruner::new(cache).with_variables(variables.clone());
        if self.trace_scopes {
            pruner = pruner.with_middleware(scope_tracer);
        }

        Ok(match pruner.prune_str(&query)? {
            PruneOutcome::FullySatisfied => format!(
                "# {} {}: nothing left to fetch.",
                output_utils::GREEN_CHECK,
                file_path.display(),
            ),

            PruneOutcome::Residual(root) => {
                let residual = root.into_document()
                    .map(|doc| doc.to_string())
                    .unwrap_or_default();
                format!("# {}\n{}", file_path.display(), residual.trim_end())
            },
        })
    }
}

#[inherent::inherent]
impl RunnableCommand for PruneCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let cache = match input_files::read_cache(&self.cache) {
            Ok(cache) => cache,
            Err(err) => return CommandResult::failure(&err),
        };

        let variables = match self.variables.as_ref().map(input_files::read_variables) {
            Some(Ok(variables)) => variables,
            Some(Err(err)) => return CommandResult::failure(&err),
            None => Default::default(),
        };

        let file_paths = match self.find_query_files() {
            Ok(file_paths) => file_paths,
            Err(err) => return CommandResult::failure(
                &err.context("Failed to collect query files"),
            ),
        };

        let mut scope_tracer = ScopeTraceMiddleware::new();
        let mut outputs = vec![];
        let mut errors = vec![];
        for file_path in &file_paths {
            match self.prune_file(file_path, &cache, &variables, &mut scope_tracer) {
                Ok(output) => outputs.push(output),
                Err(err) => errors.push(format!(
                    "{}: {err:#}",
                    file_path.display(),
                )),
            }
        }

        if self.trace_scopes {
            log::debug!("Entered {} cache scopes in total.", scope_tracer.entered());
        }

        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Failed to prune {} of {} files:\n  * {}",
                output_utils::RED_X,
                errors.len(),
                file_paths.len(),
                errors.join("\n  * "),
            ));
        }

        CommandResult::stdout(format_args!("{}", outputs.join("\n\n")))
    }
}
