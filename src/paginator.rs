use std::num::NonZeroUsize;

/// One listing page.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Page<'a, T> {
    /// 1-based.
    pub number: usize,
    pub posts: Vec<&'a T>,
    pub page_count: usize,
}

/// Number of listing pages for `post_count` posts. Always at least 1.
pub(crate) fn page_count(post_count: usize, per_page: NonZeroUsize) -> usize {
    post_count.div_ceil(per_page.get()).max(1)
}

/// Splits `posts` into listing pages.
///
/// Display order is the reverse of the order the posts were loaded in; the
/// last loaded post comes first. No timestamps are compared. An empty
/// collection still yields an empty page 1.
pub(crate) fn paginate<T>(posts: &[T], per_page: NonZeroUsize) -> Vec<Page<'_, T>> {
    let page_count = page_count(posts.len(), per_page);
    let display_order: Vec<&T> = posts.iter().rev().collect();

    if display_order.is_empty() {
        return vec![Page {
            number: 1,
            posts: vec![],
            page_count,
        }];
    }

    display_order
        .chunks(per_page.get())
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            posts: chunk.to_vec(),
            page_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn three_posts_two_per_page() {
        let posts = ["A", "B", "C"];
        let pages = paginate(&posts, per_page(2));

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].posts, [&"C", &"B"]);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].posts, [&"A"]);
        assert!(pages.iter().all(|page| page.page_count == 2));
    }

    #[test]
    fn no_posts_yields_one_empty_page() {
        let posts: [&str; 0] = [];
        let pages = paginate(&posts, per_page(10));

        assert_eq!(
            pages,
            [Page {
                number: 1,
                posts: vec![],
                page_count: 1,
            }]
        );
    }

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(page_count(0, per_page(3)), 1);
        assert_eq!(page_count(1, per_page(3)), 1);
        assert_eq!(page_count(3, per_page(3)), 1);
        assert_eq!(page_count(4, per_page(3)), 2);
        assert_eq!(page_count(7, per_page(1)), 7);
    }

    #[test]
    fn pages_cover_reversed_order_exactly_once() {
        let posts: Vec<usize> = (0..23).collect();
        for size in 1..=25 {
            let pages = paginate(&posts, per_page(size));
            assert_eq!(pages.len(), page_count(posts.len(), per_page(size)));

            let flattened: Vec<usize> = pages
                .iter()
                .flat_map(|page| page.posts.iter().map(|p| **p))
                .collect();
            let reversed: Vec<usize> = posts.iter().rev().copied().collect();
            assert_eq!(flattened, reversed);

            for (i, page) in pages.iter().enumerate() {
                assert_eq!(page.number, i + 1);
                assert!(!page.posts.is_empty() && page.posts.len() <= size);
            }
        }
    }
}
