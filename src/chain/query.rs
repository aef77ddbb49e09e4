/// Default article lookup sent to Contentful when the request does not carry
/// its own query. Fetches the article whose slug matches the normalized user
/// text. Sent through `minify_query` before hitting the wire.
pub const DEFAULT_CONTENT_QUERY: &str = r#"
  fragment ArticleTeaser on PageArticle {
    sys {
      id
    }
    title
    subtitle
    slug
    readTime
    metaImage {
      url
      title
      description
    }
  }

  query getArticle($slug: String!, $preview: Boolean) {
    pageArticleCollection(where: { slug: $slug }, limit: 1, preview: $preview) {
      items {
        sys {
          id
        }
        title
        subtitle
        slug
        updated
        readTime
        metaImage {
          url
          title
          description
        }
        relatedArticlesCollection {
          items {
            ...ArticleTeaser
          }
        }
        body {
          json
        }
      }
    }
  }
"#;
