mod util;

use mesh_geo_search::geometry::metrics::{distance, project_onto_segment};
use mesh_geo_search::prelude::*;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_cloud(seed: u64, n: usize) -> Vec<[f64; 3]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-1.0..1.0),
            ]
        })
        .collect()
}

fn cloud_mesh(seed: u64, n: usize) -> Mesh {
    Mesh::try_new("cloud", random_cloud(seed, n), Vec::new()).unwrap()
}

proptest! {
    #[test]
    fn within_agrees_with_brute_force(
        seed in any::<u64>(),
        n in 1usize..200,
        q in prop::array::uniform3(-12.0f64..12.0),
        radius in 0.0f64..6.0,
    ) {
        let coords = random_cloud(seed, n);
        let index = NodeIndex::build(&coords);

        let mut expected: Vec<(f64, usize)> = coords
            .iter()
            .enumerate()
            .map(|(id, &p)| (distance(p, q), id))
            .filter(|&(d, _)| d <= radius)
            .collect();
        expected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let got: Vec<usize> = index.within(q, radius).iter().map(|h| h.id).collect();
        prop_assert_eq!(got, expected.into_iter().map(|(_, id)| id).collect::<Vec<_>>());
    }

    #[test]
    fn nearest_is_the_global_minimum(
        seed in any::<u64>(),
        n in 1usize..200,
        q in prop::array::uniform3(-12.0f64..12.0),
    ) {
        let coords = random_cloud(seed, n);
        let index = NodeIndex::build(&coords);
        let best = coords
            .iter()
            .map(|&p| distance(p, q))
            .fold(f64::INFINITY, f64::min);
        let hit = index.nearest(q).unwrap();
        prop_assert_eq!(hit.distance, distance(coords[hit.id], q));
        prop_assert!((hit.distance - best).abs() <= 1e-12 * best.max(1.0));
    }

    #[test]
    fn polyline_result_is_exactly_the_nodes_within_tolerance(
        seed in any::<u64>(),
        n in 1usize..150,
        vertices in prop::collection::vec(prop::array::uniform3(-10.0f64..10.0), 2..6),
        eps in 0.0f64..2.0,
    ) {
        prop_assume!(Polyline::from_coords(vertices.iter().copied()).is_ok());
        let ply = Polyline::from_coords(vertices.iter().copied()).unwrap();
        let mesh = cloud_mesh(seed, n);
        let options = SearcherOptions {
            search_length: SearchLength::fixed(eps).unwrap(),
            ..SearcherOptions::default()
        };
        let searcher = MeshNodeSearcher::try_new(&mesh, &options).unwrap();
        let got = searcher.nodes_for_polyline(&ply);

        let mut sorted = got.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), got.len(), "duplicate ids in {:?}", got);

        let expected: Vec<usize> = (0..mesh.node_count())
            .filter(|&id| {
                let p = mesh.nodes()[id];
                ply.segments().any(|(a, b)| project_onto_segment(p, a, b).distance <= eps)
            })
            .collect();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn single_segment_results_advance_along_the_segment(
        seed in any::<u64>(),
        n in 1usize..150,
        a in prop::array::uniform3(-10.0f64..10.0),
        b in prop::array::uniform3(-10.0f64..10.0),
        eps in 0.0f64..3.0,
    ) {
        prop_assume!(distance(a, b) > 1e-6);
        let ply = Polyline::from_coords([a, b]).unwrap();
        let mesh = cloud_mesh(seed, n);
        let options = SearcherOptions {
            search_length: SearchLength::fixed(eps).unwrap(),
            ..SearcherOptions::default()
        };
        let searcher = MeshNodeSearcher::try_new(&mesh, &options).unwrap();
        let ts: Vec<f64> = searcher
            .nodes_for_polyline(&ply)
            .into_iter()
            .map(|id| project_onto_segment(mesh.nodes()[id], a, b).t)
            .collect();
        prop_assert!(ts.windows(2).all(|w| w[0] <= w[1]), "positions {:?}", ts);
    }

    #[test]
    fn point_query_returns_closest_node_within_tolerance(
        seed in any::<u64>(),
        n in 1usize..100,
        q in prop::array::uniform3(-10.0f64..10.0),
        eps in 0.0f64..3.0,
    ) {
        let mesh = cloud_mesh(seed, n);
        let options = SearcherOptions {
            search_length: SearchLength::fixed(eps).unwrap(),
            ..SearcherOptions::default()
        };
        let searcher = MeshNodeSearcher::try_new(&mesh, &options).unwrap();
        let closest: Vec<usize> = searcher
            .index()
            .within(q, eps)
            .first()
            .map(|h| h.id)
            .into_iter()
            .collect();
        prop_assert_eq!(searcher.nodes_for_point(q), closest);
    }
}
