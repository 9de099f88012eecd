use color_eyre::Result;

use super::Db;

impl Db {
    /// Attempts to spend `price` gems on `item_id`. The balance check and
    /// the debit are a single conditional UPDATE, so two racing purchases
    /// can never push a balance below zero. Returns the new balance, or
    /// `None` when the user can't afford the item.
    pub async fn purchase_item(
        &self,
        user_id: i64,
        item_id: &str,
        price: i64,
        grants_life: bool,
    ) -> Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let new_balance: Option<i64> = sqlx::query_scalar(
            "UPDATE users SET gems = gems - $1 WHERE id = $2 AND gems >= $1 RETURNING gems",
        )
        .bind(price)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(new_balance) = new_balance else {
            // Dropping the transaction rolls it back.
            return Ok(None);
        };

        if grants_life {
            sqlx::query("UPDATE users SET lives = lives + 1 WHERE id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("INSERT INTO purchases (user_id, item_id, price) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(item_id)
            .bind(price)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("purchase: user_id={user_id}, item={item_id}, price={price}");
        Ok(Some(new_balance))
    }
}
