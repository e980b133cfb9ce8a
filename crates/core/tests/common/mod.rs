#![allow(dead_code)]

use async_trait::async_trait;
use codenav_api::{
    ApiError, ApiResult, BundleClient, BundleManagerClient, CandidatePage, CandidateQuery,
    CandidateScope, Dump, DumpId, DumpStore, Hover, Location, LocationPage, ModelKind,
    MonikerData, MonikerKind, PackageInformation, Range,
};
use codenav_core::{CodeNavApi, ResolverConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn test_dump1() -> Dump {
    Dump::new(42, 50, "deadbeef1", "sub1/")
}

pub fn test_dump2() -> Dump {
    Dump::new(50, 51, "deadbeef2", "sub2/")
}

pub fn test_range1() -> Range {
    Range::new(1, 2, 3, 4)
}

pub fn test_range2() -> Range {
    Range::new(2, 3, 4, 5)
}

pub fn test_range3() -> Range {
    Range::new(3, 4, 5, 6)
}

pub fn test_range4() -> Range {
    Range::new(4, 5, 6, 7)
}

/// Imported symbol whose package resolves to `leftpad@0.1.0`.
pub fn import_moniker() -> MonikerData {
    MonikerData::new(MonikerKind::Import, "gomod", "pad").with_package("1234")
}

pub fn export_moniker() -> MonikerData {
    MonikerData::new(MonikerKind::Export, "gomod", "pad")
}

pub fn leftpad() -> PackageInformation {
    PackageInformation {
        name: "leftpad".to_string(),
        version: "0.1.0".to_string(),
    }
}

pub fn three_locations(dump_id: DumpId) -> Vec<Location> {
    vec![
        Location::new(dump_id, "foo.go", test_range1()),
        Location::new(dump_id, "bar.go", test_range2()),
        Location::new(dump_id, "baz.go", test_range3()),
    ]
}

/// `count` distinct locations inside one dump.
pub fn locations(dump_id: DumpId, prefix: &str, count: u32) -> Vec<Location> {
    (0..count)
        .map(|i| Location::new(dump_id, format!("{prefix}{i}.go"), Range::new(i, 0, i, 5)))
        .collect()
}

pub fn api(store: FakeStore, bundles: FakeBundleManager) -> CodeNavApi {
    api_with_config(store, bundles, ResolverConfig::default())
}

pub fn api_with_config(
    store: FakeStore,
    bundles: FakeBundleManager,
    config: ResolverConfig,
) -> CodeNavApi {
    CodeNavApi::new(Arc::new(store), Arc::new(bundles), config)
}

type Position = (String, u32, u32);

fn position(path: &str, line: u32, character: u32) -> Position {
    (path.to_string(), line, character)
}

#[derive(Default)]
pub struct FakeStore {
    dumps: HashMap<DumpId, Dump>,
    packages: HashMap<(String, String, String), DumpId>,
    candidates: HashMap<(CandidateScope, ModelKind), Vec<DumpId>>,
    failure: Option<ApiError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every call fails with `error`.
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn with_dump(mut self, dump: Dump) -> Self {
        self.dumps.insert(dump.id, dump);
        self
    }

    pub fn with_package(mut self, scheme: &str, package: &PackageInformation, dump_id: DumpId) -> Self {
        self.packages.insert(
            (
                scheme.to_string(),
                package.name.clone(),
                package.version.clone(),
            ),
            dump_id,
        );
        self
    }

    pub fn with_candidates(mut self, scope: CandidateScope, role: ModelKind, dump_ids: Vec<DumpId>) -> Self {
        self.candidates.insert((scope, role), dump_ids);
        self
    }

    /// Shared handle on the call log, usable after the store moved into an api.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().expect("lock poisoned").push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DumpStore for FakeStore {
    async fn get_dump_by_id(&self, id: DumpId) -> ApiResult<Option<Dump>> {
        self.record(format!("get_dump_by_id {id}"))?;
        Ok(self.dumps.get(&id).cloned())
    }

    async fn get_package(&self, scheme: &str, name: &str, version: &str) -> ApiResult<Option<Dump>> {
        self.record(format!("get_package {scheme} {name} {version}"))?;
        let key = (scheme.to_string(), name.to_string(), version.to_string());
        Ok(self
            .packages
            .get(&key)
            .and_then(|id| self.dumps.get(id))
            .cloned())
    }

    async fn candidate_dumps(
        &self,
        query: &CandidateQuery,
        offset: usize,
        limit: usize,
    ) -> ApiResult<CandidatePage> {
        self.record(format!("candidate_dumps {:?} {offset} {limit}", query.role))?;
        let all = self
            .candidates
            .get(&(query.scope.clone(), query.role))
            .cloned()
            .unwrap_or_default();
        Ok(CandidatePage {
            total_count: all.len(),
            dump_ids: all.into_iter().skip(offset).take(limit).collect(),
        })
    }
}

#[derive(Default)]
pub struct FakeBundle {
    definitions: HashMap<Position, Vec<Location>>,
    references: HashMap<Position, Vec<Location>>,
    monikers: HashMap<Position, Vec<Vec<MonikerData>>>,
    moniker_results: HashMap<(ModelKind, String, String), Vec<Location>>,
    hovers: HashMap<Position, Hover>,
    packages: HashMap<String, PackageInformation>,
    calls: Mutex<Vec<String>>,
}

impl FakeBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(mut self, path: &str, line: u32, character: u32, locations: Vec<Location>) -> Self {
        self.definitions.insert(position(path, line, character), locations);
        self
    }

    pub fn with_references(mut self, path: &str, line: u32, character: u32, locations: Vec<Location>) -> Self {
        self.references.insert(position(path, line, character), locations);
        self
    }

    pub fn with_monikers(
        mut self,
        path: &str,
        line: u32,
        character: u32,
        monikers: Vec<Vec<MonikerData>>,
    ) -> Self {
        self.monikers.insert(position(path, line, character), monikers);
        self
    }

    pub fn with_moniker_results(
        mut self,
        model: ModelKind,
        scheme: &str,
        identifier: &str,
        locations: Vec<Location>,
    ) -> Self {
        self.moniker_results
            .insert((model, scheme.to_string(), identifier.to_string()), locations);
        self
    }

    pub fn with_hover(mut self, path: &str, line: u32, character: u32, text: &str, range: Range) -> Self {
        self.hovers.insert(
            position(path, line, character),
            Hover {
                text: text.to_string(),
                range,
            },
        );
        self
    }

    pub fn with_package_information(mut self, id: &str, package: PackageInformation) -> Self {
        self.packages.insert(id.to_string(), package);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

#[async_trait]
impl BundleClient for FakeBundle {
    async fn definitions(&self, path: &str, line: u32, character: u32) -> ApiResult<Vec<Location>> {
        self.record(format!("definitions {path} {line} {character}"));
        Ok(self
            .definitions
            .get(&position(path, line, character))
            .cloned()
            .unwrap_or_default())
    }

    async fn references(&self, path: &str, line: u32, character: u32) -> ApiResult<Vec<Location>> {
        self.record(format!("references {path} {line} {character}"));
        Ok(self
            .references
            .get(&position(path, line, character))
            .cloned()
            .unwrap_or_default())
    }

    async fn monikers_by_position(
        &self,
        path: &str,
        line: u32,
        character: u32,
    ) -> ApiResult<Vec<Vec<MonikerData>>> {
        self.record(format!("monikers_by_position {path} {line} {character}"));
        Ok(self
            .monikers
            .get(&position(path, line, character))
            .cloned()
            .unwrap_or_default())
    }

    async fn moniker_results(
        &self,
        model: ModelKind,
        scheme: &str,
        identifier: &str,
        skip: usize,
        take: Option<usize>,
    ) -> ApiResult<LocationPage> {
        self.record(format!("moniker_results {model} {scheme} {identifier} {skip} {take:?}"));
        let all = self
            .moniker_results
            .get(&(model, scheme.to_string(), identifier.to_string()))
            .cloned()
            .unwrap_or_default();
        let total_count = all.len();
        let rows = all.into_iter().skip(skip);
        let locations = match take {
            Some(take) => rows.take(take).collect(),
            None => rows.collect(),
        };
        Ok(LocationPage {
            locations,
            total_count,
        })
    }

    async fn hover(&self, path: &str, line: u32, character: u32) -> ApiResult<Option<Hover>> {
        self.record(format!("hover {path} {line} {character}"));
        Ok(self.hovers.get(&position(path, line, character)).cloned())
    }

    async fn package_information(
        &self,
        path: &str,
        package_information_id: &str,
    ) -> ApiResult<PackageInformation> {
        self.record(format!("package_information {path} {package_information_id}"));
        self.packages
            .get(package_information_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("package information {package_information_id}")))
    }
}

#[derive(Default)]
pub struct FakeBundleManager {
    bundles: HashMap<DumpId, Arc<FakeBundle>>,
}

impl FakeBundleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(mut self, dump_id: DumpId, bundle: Arc<FakeBundle>) -> Self {
        self.bundles.insert(dump_id, bundle);
        self
    }
}

impl BundleManagerClient for FakeBundleManager {
    fn bundle_client(&self, dump_id: DumpId) -> Arc<dyn BundleClient> {
        match self.bundles.get(&dump_id) {
            Some(bundle) => bundle.clone() as Arc<dyn BundleClient>,
            None => Arc::new(FakeBundle::new()),
        }
    }
}
