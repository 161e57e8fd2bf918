//! Concurrency primitive integration tests
//!
//! Contention scenarios across many tasks on a multi-threaded runtime.

#[cfg(test)]
mod tests {
    use provider_orchestrator::utils::sync::{
        AtomicCounter, BoundedQueue, ConcurrentMap, Mutex, ResourcePool, Semaphore, SyncError,
        TtlCache,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pool_bounds_concurrent_holders() {
        let pool = Arc::new(ResourcePool::new(3, || ()));
        let holders = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..24)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let holders = Arc::clone(&holders);
                let peak = Arc::clone(&peak);
                tokio::spawn(async move {
                    let lease = pool.acquire_blocking(Duration::from_secs(5)).await.unwrap();
                    let now = holders.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    holders.fetch_sub(1, Ordering::SeqCst);
                    drop(lease);
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.available(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_queue_delivers_each_item_once() {
        let queue = Arc::new(BoundedQueue::new(16));
        let received = Arc::new(ConcurrentMap::<u32, u32>::new());

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let received = Arc::clone(&received);
                tokio::spawn(async move {
                    while let Ok(item) = queue.dequeue_blocking(Duration::from_millis(200)).await {
                        received.update(item, || 0, |count| *count += 1);
                    }
                })
            })
            .collect();

        let mut sent = 0;
        while sent < 200 {
            if queue.enqueue(sent) {
                sent += 1;
            } else {
                tokio::task::yield_now().await;
            }
        }

        for consumer in consumers {
            consumer.await.unwrap();
        }

        assert_eq!(received.len(), 200);
        for item in 0..200 {
            assert_eq!(received.get(&item), Some(1));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_mutex_serializes_read_modify_write() {
        let shared = Arc::new(Mutex::new(0u64));
        let counter = Arc::new(AtomicCounter::default());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    for _ in 0..100 {
                        let mut guard = shared.lock_timeout(Duration::from_secs(5)).await.unwrap();
                        let value = *guard;
                        tokio::task::yield_now().await;
                        *guard = value + 1;
                        counter.increment();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*shared.lock().await, 1600);
        assert_eq!(counter.get(), 1600);
    }

    #[tokio::test]
    async fn test_semaphore_drain_wakes_all_waiters() {
        let semaphore = Arc::new(Semaphore::new(0));

        let waiters: Vec<_> = (0..5)
            .map(|_| {
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    semaphore
                        .acquire_timeout(Duration::from_secs(5))
                        .await
                        .map(|_| ())
                })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        semaphore.drain();

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Err(SyncError::Closed));
        }
    }

    #[tokio::test]
    async fn test_ttl_cache_mixed_lifetimes() {
        let cache: TtlCache<String, u32> = TtlCache::new();
        for i in 0..10u32 {
            let ttl = if i % 2 == 0 {
                Duration::from_millis(10)
            } else {
                Duration::from_secs(60)
            };
            cache.set(format!("k{}", i), i, ttl);
        }

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.cleanup(), 5);
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.get(&"k1".to_string()), Some(1));
        assert_eq!(cache.get(&"k2".to_string()), None);
    }
}
