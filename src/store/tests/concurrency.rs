use super::*;

/// Writers on several tasks never push the history past its capacity
#[tokio::test]
async fn test_concurrent_writers() {
    let cache: Arc<dyn ResultStore> = Arc::new(SimulationCache::new(4).unwrap());
    let template = report("MASS_AVE", 0);
    let mut handles = Vec::new();
    for seed in 0..16u64 {
        let cache = cache.clone();
        let mut entry = template.clone();
        entry.seed = seed;
        handles.push(tokio::spawn(async move { cache.record(entry).await }));
    }
    for handle in futures::future::join_all(handles).await {
        handle.unwrap().unwrap();
    }
    assert_eq!(cache.history("MASS_AVE").await.unwrap().len(), 4);
}
