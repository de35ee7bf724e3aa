use modelpath::graph::{
    Edge, EdgeKind, HopCost, ModelProvider, RelationInfo, RelationValue, ShortestPathSearch,
};
use modelpath::model::{MemoryModel, ObjectId};
use modelpath::{ModelPathError, ObjectSpace, PathConfig, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::tempdir;

/// a owns b, b owns c, a.ref = c
fn nested_with_reference(with_inverse: bool) -> (MemoryModel, [ObjectId; 3]) {
    let mut model = MemoryModel::new();
    let owned = model.define_relation("owned", true, true).unwrap();
    let owner = model.define_relation("owner", false, false).unwrap();
    let reference = model.define_relation("ref", false, false).unwrap();
    if with_inverse {
        model.set_inverse(&owned, &owner).unwrap();
    }

    let a = model.create_object("Element");
    let b = model.create_object("Element");
    let c = model.create_object("Element");
    model.contain(a, &owned, b).unwrap();
    model.contain(b, &owned, c).unwrap();
    model.set_single(a, &reference, Some(c)).unwrap();
    (model, [a, b, c])
}

#[test]
fn test_cross_reference_shortcut() {
    let (model, [a, _, c]) = nested_with_reference(true);
    let search = ShortestPathSearch::new(&model, a).unwrap();
    let path = search.shortest_path_to(&c);

    assert!(path.is_reachable());
    assert_eq!(path.len(), 1);
    assert_eq!(path.edges()[0].relation().name(), "ref");
    assert_eq!(path.edges()[0].kind(), EdgeKind::CrossReference);
    assert_eq!(path.distance(), HopCost::from(1));
}

#[test]
fn test_child_to_container_single_edge() {
    let (model, [a, b, _]) = nested_with_reference(true);
    let search = ShortestPathSearch::new(&model, b).unwrap();
    let path = search.shortest_path_to(&a);

    assert!(path.is_reachable());
    assert_eq!(path.len(), 1);
    assert_eq!(path.edges()[0].kind(), EdgeKind::Container);
    assert_eq!(path.edges()[0].relation().name(), "owner");
    assert_eq!(path.distance(), HopCost::from(1));
}

#[test]
fn test_containment_only_descends_without_inverse() {
    let (model, [a, b, c]) = nested_with_reference(false);

    let down = ShortestPathSearch::new(&model, a).unwrap();
    assert_eq!(down.shortest_path_to(&b).nodes(), vec![a, b]);

    let up = ShortestPathSearch::new(&model, c).unwrap();
    assert!(!up.shortest_path_to(&a).is_reachable());
    assert!(!up.shortest_path_to(&b).is_reachable());
}

#[test]
fn test_reversed_edges_mirror_path() {
    let (model, [a, _, c]) = nested_with_reference(true);
    let search = ShortestPathSearch::new(&model, c).unwrap();
    let path = search.shortest_path_to(&a);
    let reversed = path.reversed_edges();

    assert_eq!(path.len(), 2);
    assert_eq!(reversed.len(), 2);
    for (forward, backward) in path.edges().iter().zip(reversed.iter().rev()) {
        assert!(Edge::same(forward, backward));
    }
    assert_eq!(*path.edges()[0].source(), c);
}

#[test]
fn test_path_through_list_position() {
    let mut model = MemoryModel::new();
    let members = model.define_relation("members", false, true).unwrap();
    let group = model.create_object("Group");
    let first = model.create_object("Person");
    let second = model.create_object("Person");
    model.add_to(group, &members, first).unwrap();
    model.add_to(group, &members, second).unwrap();

    let search = ShortestPathSearch::new(&model, group).unwrap();
    let path = search.shortest_path_to(&second);

    assert_eq!(path.edges()[0].index(), 1);
    let reversed = path.reversed_edges();
    assert_eq!(reversed.len(), path.len());
    assert_eq!(*reversed[0].target(), second);
}

#[test]
fn test_object_space_tracks_new_objects() {
    let (mut model, [a, b, c]) = nested_with_reference(true);
    let owned = model.relation_by_name("owned").unwrap();
    let space = ObjectSpace::capture(&model, a).unwrap();
    assert_eq!(space.len(), 3);

    let added = model.create_object("Element");
    model.contain(b, &owned, added).unwrap();
    assert!(space.is_new_object(&added));
    assert!(space.is_initial_object(&c));

    let path = space.find_shortest_path(&model, added, &c).unwrap();
    assert_eq!(path.nodes(), vec![added, b, c]);
    assert_eq!(path.distance(), HopCost::from(2));
}

#[test]
fn test_config_weights_reroute() {
    let (model, [a, b, c]) = nested_with_reference(true);
    let dir = tempdir().unwrap();
    let path = dir.path().join("modelpath.toml");
    std::fs::write(
        &path,
        "version = 1\n\n[weights]\ncontainment = 0.5\n\n[weights.relations]\nref = 3.0\n",
    )
    .unwrap();

    let config = PathConfig::load(&path).unwrap();
    let weights = Arc::new(config.relation_weights().unwrap());
    let search = ShortestPathSearch::with_weights(&model, a, weights).unwrap();
    let route = search.shortest_path_to(&c);

    assert_eq!(route.nodes(), vec![a, b, c]);
    assert_eq!(route.distance().value(), 1.0);
}

#[test]
fn test_report_serializes_path() {
    let (model, [a, _, c]) = nested_with_reference(true);
    let search = ShortestPathSearch::new(&model, c).unwrap();
    let report = search.shortest_path_to(&a).report();

    assert!(report.found);
    assert_eq!(report.from, c.to_string());
    assert_eq!(report.steps.len(), 2);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["steps"][0]["type"], "owner");
    assert_eq!(json["steps"][0]["kind"], "container");
    assert_eq!(json["distance"], 2.0);
}

/// Cross-references only, keyed by name; fails when asked about `broken`
struct TableModel {
    references: HashMap<&'static str, Vec<(&'static str, Vec<&'static str>)>>,
    broken: Option<&'static str>,
}

impl ModelProvider for TableModel {
    type Node = &'static str;
    type Relation = &'static str;

    fn outgoing_relations(&self, node: &&'static str) -> Result<Vec<RelationInfo<&'static str>>> {
        if self.broken == Some(*node) {
            return Err(ModelPathError::Other(format!("backend unavailable for {node}")));
        }
        let relations = self.references.get(node).map(Vec::as_slice).unwrap_or(&[]);
        Ok(relations
            .iter()
            .map(|(relation, _)| RelationInfo {
                relation: *relation,
                many: true,
                containment: false,
                container: false,
            })
            .collect())
    }

    fn relation_value(
        &self,
        node: &&'static str,
        relation: &&'static str,
    ) -> Result<RelationValue<&'static str>> {
        self.references
            .get(node)
            .and_then(|relations| relations.iter().find(|(r, _)| r == relation))
            .map(|(_, targets)| RelationValue::Many(targets.clone()))
            .ok_or_else(|| ModelPathError::not_applicable(relation, node))
    }

    fn container_of(&self, _node: &&'static str) -> Result<Option<&'static str>> {
        Ok(None)
    }

    fn containment_relation_of(&self, _node: &&'static str) -> Result<Option<&'static str>> {
        Ok(None)
    }

    fn inverse_of(&self, _relation: &&'static str) -> Result<Option<&'static str>> {
        Ok(None)
    }

    fn all_nodes_of(&self, root: &&'static str) -> Result<Vec<&'static str>> {
        Ok(vec![*root])
    }
}

fn table(broken: Option<&'static str>) -> TableModel {
    let mut references = HashMap::new();
    references.insert("start", vec![("next", vec!["left", "right"])]);
    references.insert("left", vec![("next", vec!["goal"])]);
    references.insert("right", vec![("skip", vec!["goal"])]);
    TableModel { references, broken }
}

#[test]
fn test_custom_provider() {
    let model = table(None);
    let search = ShortestPathSearch::new(&model, "start").unwrap();
    let path = search.shortest_path_to(&"goal");

    assert!(path.is_reachable());
    assert_eq!(path.len(), 2);
    assert_eq!(*path.edges()[0].source(), "start");
    assert_eq!(*path.edges()[1].target(), "goal");
    assert_eq!(search.reached_nodes().count(), 4);
}

#[test]
fn test_provider_failure_propagates() {
    let model = table(Some("right"));
    let err = ShortestPathSearch::new(&model, "start").unwrap_err();
    assert_eq!(err.error_type(), "other");
    assert!(err.to_string().contains("right"));
}
