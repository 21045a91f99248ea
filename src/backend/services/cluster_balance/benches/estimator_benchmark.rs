use async_trait::async_trait;
use cluster_balance::{
    ClusterService, DiscoveryService, EstimatorConfig, IndexerRepository, OperatorDeltaPolicy,
    Result,
};
use cluster_models::{
    Address, Amount, BlockNumber, ClusterKey, ClusterSnapshot, DaoParameters, FeeSnapshot, Network,
    OperatorFee, OperatorId, PackedIndex, SnapshotBundle,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

const BLOCK: BlockNumber = 20_000_000;

fn snapshot(rate: i128) -> FeeSnapshot {
    FeeSnapshot {
        rate_per_block: Amount(rate),
        index_at_snapshot: Amount(rate * 1_000_000),
        block_at_snapshot: BLOCK - 50_000,
    }
}

fn bundle(key: &ClusterKey, block: BlockNumber) -> SnapshotBundle {
    SnapshotBundle {
        block,
        dao: DaoParameters {
            minimum_liquidation_collateral: Amount(940_000_000_000_000_000),
            liquidation_threshold_blocks: 214_800,
        },
        network_fee: snapshot(3_550_929_823),
        operators: key
            .operator_ids
            .iter()
            .map(|&id| OperatorFee {
                id,
                snapshot: snapshot(382_640_000 + i128::from(id.0)),
            })
            .collect(),
        cluster: ClusterSnapshot {
            validator_count: 4,
            network_fee_index: PackedIndex(300_000),
            operator_fee_index: PackedIndex(1_200_000),
            stored_balance: Amount(50_000_000_000_000_000_000),
        },
    }
}

/// Answers from memory so only the estimation pipeline is measured.
struct StaticIndexer {
    clusters: usize,
}

#[async_trait]
impl IndexerRepository for StaticIndexer {
    async fn current_block(&self) -> Result<BlockNumber> {
        Ok(BLOCK)
    }

    async fn active_clusters(&self, _account: &Address) -> Result<Vec<Vec<OperatorId>>> {
        Ok((0..self.clusters as u64)
            .map(|i| (1..=4).map(|j| OperatorId(i * 4 + j)).collect())
            .collect())
    }

    async fn snapshot_bundle(&self, key: &ClusterKey, block: BlockNumber) -> Result<SnapshotBundle> {
        Ok(bundle(key, block))
    }
}

fn benchmark_cluster_estimate(c: &mut Criterion) {
    let owner: Address = "0x0000000000000000000000000000000000000001".parse().unwrap();
    let mut group = c.benchmark_group("cluster_estimate");

    for operators in [4u64, 7, 13] {
        let key = ClusterKey::new(owner.clone(), (1..=operators).map(OperatorId).collect()).unwrap();
        let bundle = bundle(&key, BLOCK);

        for policy in [OperatorDeltaPolicy::Aggregate, OperatorDeltaPolicy::ClampPerOperator] {
            let service = ClusterService::new(policy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), operators),
                &bundle,
                |b, bundle| b.iter(|| service.estimate(&key, bundle).unwrap()),
            );
        }
    }

    group.finish();
}

fn benchmark_account_batch(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let owner: Address = "0x0000000000000000000000000000000000000001".parse().unwrap();
    let mut group = c.benchmark_group("account_batch");

    for clusters in [1usize, 10, 100] {
        let service = DiscoveryService::new(EstimatorConfig::default())
            .with_network(Network::Mainnet, Arc::new(StaticIndexer { clusters }));

        group.throughput(Throughput::Elements(clusters as u64));
        group.bench_with_input(BenchmarkId::from_parameter(clusters), &clusters, |b, _| {
            b.to_async(&rt).iter(|| {
                let service = &service;
                let owner = &owner;
                async move {
                    service
                        .discover_and_estimate(owner, Network::Mainnet)
                        .await
                        .unwrap();
                }
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_cluster_estimate, benchmark_account_batch
}
criterion_main!(benches);
